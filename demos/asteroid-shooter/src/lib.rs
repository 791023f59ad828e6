use wasm_bindgen::prelude::*;
use starfall_engine::*;

mod game;
use game::AsteroidShooter;

starfall_web::export_scene!(AsteroidShooter, "asteroid-shooter");
