pub mod aeroapi;
