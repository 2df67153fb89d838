#[cfg(test)]
mod test_normalizer;

#[cfg(test)]
mod test_parser_precedence;

#[cfg(test)]
mod test_catalogue_domain;

#[cfg(test)]
mod test_simplifier;

#[cfg(test)]
mod test_functions_integration;
