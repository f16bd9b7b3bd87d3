pub mod observation;
pub mod request_params;
pub mod series_descriptor;
