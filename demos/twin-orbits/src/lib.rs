use wasm_bindgen::prelude::*;
use starfall_engine::*;

mod game;
use game::TwinOrbits;

starfall_web::export_scene!(TwinOrbits, "twin-orbits");
