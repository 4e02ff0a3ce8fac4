//---------------------------------------
pub mod web_api {
    pub mod api_error;
    pub mod controllers;
    pub mod routes;
}

pub use web_api::api_error;
pub use web_api::controllers::*;
pub use web_api::routes::map_routes;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
}

pub use shared::models::*;
pub use shared::dto::*;
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod gateway;
    pub mod store_error;
}

pub use data_access::*;
//---------------------------------------
