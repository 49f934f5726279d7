mod tests_catalog_run;
