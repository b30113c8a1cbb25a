#![forbid(unsafe_code)]

/// Errors produced while compiling or running a normalization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("duplicate sort parent: {0}")]
    DuplicateSortParent(String),

    #[error("cycle among sort specifications: {}", .0.join(" -> "))]
    CycleDetected(Vec<String>),

    #[error("element name {name:?} contains the reserved delimiter {delimiter:?}")]
    TemplateInjection { name: String, delimiter: char },

    #[error("stage compilation error: {0}")]
    StageCompilation(String),

    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("transform error: {0}")]
    Transform(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    File {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for errors raised by an invalid [`Configuration`](crate::Configuration),
    /// before any stage has been produced.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::DuplicateSortParent(_) | Self::CycleDetected(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_shows_path() {
        let err = Error::CycleDetected(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(err.to_string(), "cycle among sort specifications: a -> b -> a");
        assert!(err.is_config_error());
    }

    #[test]
    fn test_io_errors_keep_their_kind() {
        fn write_closed() -> Result<()> {
            Err::<(), _>(std::io::Error::from(std::io::ErrorKind::BrokenPipe))?;
            Ok(())
        }
        match write_closed() {
            Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_injection_is_not_config_family() {
        let err = Error::TemplateInjection {
            name: "a|b".into(),
            delimiter: '|',
        };
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("'|'"));
    }
}
