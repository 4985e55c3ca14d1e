//! Static Schengen-area classification of counterpart cities.
//!
//! City names are matched exactly as the flight API spells them. Anything
//! not in the table is treated as outside the Schengen area.

use std::collections::HashMap;
use std::sync::LazyLock;

static SCHENGEN_CITIES: &[(&str, bool)] = &[
    ("Santa Lucía", false),
    ("Santa Catarina", false),
    ("Sao Paulo", false),
    ("Tanger", false),
    ("Rio de Janeiro", false),
    ("Luanda", false),
    ("Cairo", false),
    ("Faro / Algarve Int. Faro", true),
    ("Malaga", true),
    ("Ankara", false),
    ("Barcelona", true),
    ("Algiers", false),
    ("Dublin", false),
    ("Ponta Delgada", true),
    ("Sevilla", true),
    ("Madrid", true),
    ("Doha", false),
    ("London", false),
    ("Luqa", true),
    ("Francisco Sa Carneiro Int.", true),
    ("Nice", true),
    ("Casablanca", false),
    ("Palma de Mallorca", true),
    ("Dubai", false),
    ("Milan", true),
    ("Saint Exupery", true),
    ("Stockholm", true),
    ("Diass", false),
    ("Bergamo", true),
    ("Sal", false),
    ("Santiago", true),
    ("Budapest", true),
    ("Manises", true),
    ("Marseille", true),
    ("Blagnac", true),
    ("Amsterdam", true),
    ("Rome", true),
    ("Brussels", true),
    ("Mediterranee", true),
    ("Paris", true),
    ("Geneva", true),
    ("Marrakech", false),
    ("Nantes", true),
    ("Charleroi", true),
    ("Vitoria", true),
    ("Orly (near Paris)", true),
    ("Agadir", false),
    ("Munich", true),
    ("Beauvais", true),
    ("Warsaw", true),
    ("Toronto", false),
    ("Edinburgh", false),
    ("Zurich", true),
    ("Rotterdam", true),
    ("Sofia", false),
    ("Montreal", false),
    ("Newark", false),
    ("Bristol", false),
    ("Eindhoven", true),
    ("Manchester", false),
    ("Frankfurt am Main", true),
    ("Berlin", true),
    ("Salvador", false),
    ("Hamburg", true),
    ("Bologna", true),
    ("Jasionka", true),
    ("Dusseldorf", true),
    ("Fortaleza", false),
    ("Belem", false),
    ("Boston", false),
    ("Recife", false),
    ("New York", false),
    ("Washington", false),
    ("Vienna", true),
    ("Istanbul", false),
    ("Venice (Venezia)", true),
    ("Vantaa", true),
    ("Nowy Dwor Mazowiecki", true),
    ("Sao Vicente", false),
    ("EuroAirport (Basel)", true),
    ("Bilbao / Bilbo", true),
    ("Florence (Firenze)", true),
    ("Bordeaux/Merignac", true),
    ("Prague", true),
    ("Florianopolis", false),
    ("Stuttgart", true),
    ("Bissau", false),
    ("Natal", false),
    ("Santa Maria Island / Vila do Porto", true),
    ("Copenhagen", true),
    ("Luxembourg", true),
    ("Athens", true),
    ("Hangzhou", false),
    ("Campinas", false),
    ("Miami", false),
    ("Philadelphia", false),
    ("Belo Horizonte", false),
    ("Gran Canaria", true),
    ("Brasilia", false),
    ("San Francisco", false),
    ("Cologne/Bonn", true),
    ("Balice", true),
    ("Tenerife", true),
    ("Birmingham", false),
    ("Abu Dhabi", false),
    ("Horta", true),
    ("Oslo", true),
    ("Alicante / Benidorm / Costa Blanca", true),
    ("Seoul (Incheon)", false),
    ("İzmir", false),
    ("Aviles / Gijon / Oviedo (Asturias)", true),
    ("Porto Santo Island / Vila Baleira {Porto Santo Island}", true),
    ("Bucharest", false),
    ("Ibiza Island / Eivisa", true),
    ("Chicago", false),
    ("Menorca", true),
    ("Farnborough", false),
    ("Palmeira", false),
    ("Accra", false),
    ("Pico Island", true),
    ("Naples", true),
    ("Tel Aviv", false),
    ("Belgrade", false),
    ("Maputo", false),
    ("Pisa", true),
    ("Vilnius", true),
    ("Montijo", true),
    ("Ostend", true),
    ("Aalborg", true),
    ("Bratislava", true),
    ("Boa Vista", false),
    ("Glasgow", false),
    ("Split", true),
    ("Tunis", false),
    ("Keflavik", true),
    ("RIGA", true),
    ("Punta Cana", false),
    ("Maiquetia", false),
    ("Beja", true),
    ("Poznan", true),
    ("Cancun", false),
    ("Cardiff", false),
    ("Leipzig/Halle", true),
    ("Teterboro", false),
    ("Varadero", false),
    ("Girona", true),
    ("Sao Tome", false),
    ("Lisbon", true),
    ("Port Gentil", false),
    ("Abidjan", false),
    ("Cascais / Estoril", true),
    ("Nouadhibou", false),
    ("Liege", true),
    ("Kaunas", true),
    ("Graz", true),
    ("Wrocław", true),
    ("Terceira Island /Praia da Vitoria /Angra area", true),
];

static LOOKUP: LazyLock<HashMap<&'static str, bool>> =
    LazyLock::new(|| SCHENGEN_CITIES.iter().copied().collect());

/// Returns whether `city` lies in the Schengen area.
///
/// Total over all inputs: cities missing from the table (including the
/// `"unknown"` placeholder) classify as non-Schengen.
pub fn is_schengen(city: &str) -> bool {
    LOOKUP.get(city).copied().unwrap_or(false)
}
