use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("a {0} requires a non-empty name")]
    EmptyName(String),
    #[error("{0} {1:?} requires a non-empty description")]
    EmptyDescription(String, String),
    #[error("declaration {0:?} refers to dependency index {1} but only {2} declarations exist")]
    UnknownDependency(String, usize, usize),
    #[error("declarations form a dependency cycle: {0}")]
    DependencyCycle(CycleList),
    #[error("template {0:?} re-enters its own expansion")]
    TemplateCycle(String),
    #[error("failed to write {0:?}: {1}")]
    FileWrite(PathBuf, LastError),
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = s.split_whitespace().into_iter().next().unwrap_or("");
        // retain capitalization if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

/// The names along a closed dependency walk, first node repeated at the end.
#[derive(Debug, PartialEq)]
pub struct CycleList(pub Vec<String>);

impl Display for CycleList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.0.iter();
        if let Some(first) = names.next() {
            write!(f, "'{}'", first)?;
            for name in names {
                write!(f, " -> '{}'", name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cycle_list_display() {
        let cycle = CycleList(vec![
            String::from("word_t"),
            String::from("line_t"),
            String::from("word_t"),
        ]);
        assert_eq!(cycle.to_string(), "'word_t' -> 'line_t' -> 'word_t'");

        let empty = CycleList(Vec::new());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn lowerize() {
        assert_eq!(
            Error::lowerize(String::from("Failed to write")),
            "failed to write"
        );
        // all-caps leading words keep their casing
        assert_eq!(Error::lowerize(String::from("IO error")), "IO error");
    }

    #[test]
    fn message_casing() {
        let err = Error::EmptyName(String::from("signal"));
        assert_eq!(err.to_string(), "a signal requires a non-empty name");
    }
}
