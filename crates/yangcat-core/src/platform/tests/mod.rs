mod tests_schema_source;
