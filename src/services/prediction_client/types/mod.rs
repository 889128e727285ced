pub mod prediction_service_error;
