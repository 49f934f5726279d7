mod tests_setup_logging;
