use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "usage: tinygrep [-r] -E <pattern> [PATH...]";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("missing required '-E <pattern>'")]
    MissingPattern,
    #[error("'-E' expects a pattern")]
    MissingPatternValue,
    #[error("unknown option '{0}'")]
    UnknownOption(String),
}

/// Options taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub pattern: String,
    pub recursive: bool,
    pub paths: Vec<PathBuf>,
}

impl Config {
    /// Parse arguments, not including the program name.
    ///
    /// Everything after `--` is taken as a path.
    pub fn from_args<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut pattern = None;
        let mut recursive = false;
        let mut paths = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-E" => pattern = Some(args.next().ok_or(UsageError::MissingPatternValue)?),
                "-r" => recursive = true,
                "--" => paths.extend(args.by_ref().map(PathBuf::from)),
                opt if opt.starts_with('-') && opt.len() > 1 => {
                    return Err(UsageError::UnknownOption(opt.to_string()))
                }
                path => paths.push(PathBuf::from(path)),
            }
        }

        Ok(Self {
            pattern: pattern.ok_or(UsageError::MissingPattern)?,
            recursive,
            paths,
        })
    }

    /// Whether printed lines carry a `path:` prefix.
    pub fn prefix_paths(&self) -> bool {
        self.recursive || self.paths.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn should_parse_pattern_and_paths() {
        let config = Config::from_args(args(&["-r", "-E", "a+", "dir", "file.txt"])).unwrap();

        assert_eq!("a+", config.pattern);
        assert!(config.recursive);
        assert_eq!(
            vec![PathBuf::from("dir"), PathBuf::from("file.txt")],
            config.paths
        );
        assert!(config.prefix_paths());
    }

    #[test]
    fn should_read_from_stdin_without_paths() {
        let config = Config::from_args(args(&["-E", r"\d"])).unwrap();

        assert!(config.paths.is_empty());
        assert!(!config.prefix_paths());
    }

    #[test]
    fn should_treat_arguments_after_double_dash_as_paths() {
        let config = Config::from_args(args(&["-E", "x", "--", "-r"])).unwrap();

        assert!(!config.recursive);
        assert_eq!(vec![PathBuf::from("-r")], config.paths);
    }

    #[test]
    fn should_reject_bad_usage() {
        assert_eq!(
            Err(UsageError::MissingPattern),
            Config::from_args(args(&["file.txt"]))
        );
        assert_eq!(
            Err(UsageError::MissingPatternValue),
            Config::from_args(args(&["-E"]))
        );
        assert_eq!(
            Err(UsageError::UnknownOption("-x".to_string())),
            Config::from_args(args(&["-x", "-E", "a"]))
        );
    }
}
