mod tests_documents;
mod tests_normalize;
mod tests_uri;
