pub mod prediction_client;
