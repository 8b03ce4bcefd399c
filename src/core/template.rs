//! `<%tag%>` placeholder expansion against a generation-time tag table.

use super::context::TagMap;
use crate::error::Error;

/// The tag that splices the copyright template into another template.
pub const COPYRIGHT_TAG: &str = "copyright";
/// The tag that splices the license template into another template.
pub const LICENSE_TAG: &str = "license";

/// Expands templates against a tag table.
///
/// Lookup misses leave the tag text untouched so callers can pre-validate
/// only the tags they require. The copyright and license templates may be
/// embedded into other templates through their tags; re-entering a template
/// that is still being expanded is a configuration error.
pub struct Engine<'a> {
    tags: &'a TagMap,
    copyright: &'a str,
    license: &'a str,
}

impl<'a> Engine<'a> {
    pub fn new(tags: &'a TagMap) -> Self {
        Self {
            tags: tags,
            copyright: "",
            license: "",
        }
    }

    /// Attaches the two templates that other templates may embed by tag.
    pub fn boilerplate(mut self, copyright: &'a str, license: &'a str) -> Self {
        self.copyright = copyright;
        self.license = license;
        self
    }

    /// Performs tag replacement on the given `text`.
    pub fn expand(&self, text: &str) -> Result<String, Error> {
        self.run(text, &mut Vec::new())
    }

    fn run(&self, text: &str, active: &mut Vec<String>) -> Result<String, Error> {
        let mut result = String::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            // check if there is a valid tag replacement
            if c == '<' && chars.peek() == Some(&'%') {
                match gather_tag(&mut chars) {
                    Ok(raw) => {
                        // remove delimiters and surrounding whitespace to get the key
                        let key = raw[2..raw.len() - 2].trim().to_string();
                        result.push_str(&self.resolve(&key, &raw, active)?);
                    }
                    Err(partial) => result.push_str(&partial),
                }
            } else {
                result.push(c);
            }
        }
        Ok(result)
    }

    /// Swaps a single tag for its value.
    ///
    /// Template-embedding tags expand their attached template in place;
    /// everything else is looked up in the tag table, keeping the raw tag
    /// text on a miss.
    fn resolve(&self, key: &str, raw: &str, active: &mut Vec<String>) -> Result<String, Error> {
        let embedded = match key {
            COPYRIGHT_TAG => Some(self.copyright),
            LICENSE_TAG => Some(self.license),
            _ => None,
        };
        if let Some(template) = embedded {
            if template.is_empty() == false {
                if active.iter().any(|name| name == key) == true {
                    return Err(Error::TemplateCycle(key.to_string()));
                }
                active.push(key.to_string());
                let expansion = self.run(template, active)?;
                active.pop();
                return Ok(expansion);
            }
        }
        match self.tags.get(key) {
            Some(value) => Ok(value.to_string()),
            None => Ok(raw.to_string()),
        }
    }
}

/// Collects the full tag text `<%...%>` from the character stream.
///
/// Assumes the leading `<` was already consumed and the `%` was peeked.
/// Errors with the consumed text when the closing delimiter never appears,
/// so malformed tags pass through verbatim.
fn gather_tag<T: Iterator<Item = char>>(chars: &mut T) -> Result<String, String> {
    let mut tag = String::from('<');
    let mut last = match chars.next() {
        Some(c) => {
            tag.push(c);
            c
        }
        None => return Err(tag),
    };
    while let Some(c) = chars.next() {
        tag.push(c);
        if c == '>' && last == '%' {
            return Ok(tag);
        }
        last = c;
    }
    // never was able to close the tag
    Err(tag)
}

#[cfg(test)]
mod test {
    use super::*;

    /// Internal helper test `fn` to generate a sample tag table.
    fn create_tags() -> TagMap {
        let mut tags = TagMap::new();
        tags.add("developer", "Jane");
        tags.add("year", "2024");
        tags.add("entity", "gates");
        tags
    }

    #[test]
    fn gather_tag_cases() {
        let text = "% filename %>";
        assert_eq!(
            gather_tag(&mut text.chars()),
            Ok("<% filename %>".to_owned())
        );

        // a lone '%' does not close the tag
        let text = "% filename >";
        assert_eq!(gather_tag(&mut text.chars()), Err("<% filename >".to_owned()));

        let text = "%never closed";
        assert_eq!(gather_tag(&mut text.chars()), Err("<%never closed".to_owned()));
    }

    #[test]
    fn replace_tags() {
        let tags = create_tags();
        let engine = Engine::new(&tags);
        assert_eq!(
            engine.expand("Copyright (c) <%developer%> <%year%>").unwrap(),
            "Copyright (c) Jane 2024"
        );
        // whitespace around the key is ignored
        assert_eq!(
            engine.expand("<%  entity  %> rising").unwrap(),
            "gates rising"
        );
    }

    #[test]
    fn unknown_tags_pass_through() {
        let tags = create_tags();
        let engine = Engine::new(&tags);
        assert_eq!(
            engine.expand("made by <%unknown%> today").unwrap(),
            "made by <%unknown%> today"
        );
    }

    #[test]
    fn tagless_text_is_untouched() {
        let tags = create_tags();
        let engine = Engine::new(&tags);
        let text = "entity alu is port ( a : in std_logic );";
        assert_eq!(engine.expand(text).unwrap(), text);
        // stray delimiters survive as written
        let text = "if a < b and b % 2 > 0 then";
        assert_eq!(engine.expand(text).unwrap(), text);
    }

    #[test]
    fn expansion_is_repeatable() {
        let tags = create_tags();
        let engine = Engine::new(&tags);
        let first = engine.expand("<%developer%> wrote <%entity%>").unwrap();
        let second = engine.expand("<%developer%> wrote <%entity%>").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn embedded_boilerplate() {
        let tags = create_tags();
        let engine = Engine::new(&tags).boilerplate("(c) <%year%> <%developer%>", "");
        assert_eq!(
            engine.expand("header: <%copyright%>").unwrap(),
            "header: (c) 2024 Jane"
        );
        // an unattached license tag falls back to the table lookup path
        assert_eq!(
            engine.expand("<%license%>").unwrap(),
            "<%license%>"
        );
    }

    #[test]
    fn self_referencing_template_is_an_error() {
        let tags = create_tags();
        let engine = Engine::new(&tags).boilerplate("(c) <%copyright%>", "");
        assert_eq!(
            engine.expand("<%copyright%>"),
            Err(Error::TemplateCycle(String::from("copyright")))
        );
    }

    #[test]
    fn cross_template_cycle_is_an_error() {
        let tags = create_tags();
        let engine = Engine::new(&tags).boilerplate("see <%license%>", "see <%copyright%>");
        assert_eq!(
            engine.expand("<%copyright%>"),
            Err(Error::TemplateCycle(String::from("copyright")))
        );
        assert_eq!(
            engine.expand("<%license%>"),
            Err(Error::TemplateCycle(String::from("license")))
        );
    }
}
