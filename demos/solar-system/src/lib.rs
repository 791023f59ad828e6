use wasm_bindgen::prelude::*;
use starfall_engine::*;

mod game;
mod planets;
use game::SolarSystem;

starfall_web::export_scene!(SolarSystem, "solar-system");
