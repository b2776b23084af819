use heck::{ToSnakeCase, ToUpperCamelCase};

/// `FooBar` -> `foo_bar`
pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

/// `foo_bar` -> `FooBar`
pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_splits_words() {
        assert_eq!(snake_case("Animal"), "animal");
        assert_eq!(snake_case("GuideDog"), "guide_dog");
        assert_eq!(snake_case("HTTPServer"), "http_server");
    }

    #[test]
    fn upper_camel_case_joins_words() {
        assert_eq!(upper_camel_case("guide_dog"), "GuideDog");
        assert_eq!(upper_camel_case("animal"), "Animal");
    }
}
