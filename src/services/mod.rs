pub mod flight_api;
