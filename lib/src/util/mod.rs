mod macros;
mod path_ext;

pub use macros::*;
pub use path_ext::*;

/// The complete extension of `name`, if any, without the leading dot.
pub fn file_ext(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod ext_tests {
    #[test]
    fn test_file_ext() {
        use crate::util::file_ext;

        assert_eq!(file_ext("index.html"), Some("html"));
        assert_eq!(file_ext("archive.tar.gz"), Some("gz"));
        assert_eq!(file_ext("README"), None);
        assert_eq!(file_ext(".gitignore"), Some("gitignore"));
    }
}
