mod tests_cataloger;
mod tests_model;
