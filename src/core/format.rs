use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Process-wide formatting knobs consulted by every stage of generation.
///
/// Every field is optional so a host can deserialize a partial table and
/// `merge` the gaps from another instance; the getters fall back to the
/// documented defaults.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DocFormat {
    #[serde(rename = "tab-size")]
    tab_size: Option<u8>,
    #[serde(rename = "use-tabs")]
    use_tabs: Option<bool>,
    #[serde(rename = "line-width")]
    line_width: Option<u16>,
    #[serde(rename = "flower-box-char")]
    flower_box_char: Option<char>,
    #[serde(rename = "sub-header")]
    sub_header: Option<bool>,
    #[serde(rename = "file-header")]
    file_header: Option<Vec<String>>,
    #[serde(rename = "copyright")]
    copyright: Option<String>,
    #[serde(rename = "license")]
    license: Option<Vec<String>>,
    #[serde(rename = "section-start")]
    section_start: Option<String>,
    #[serde(rename = "section-end")]
    section_end: Option<String>,
    #[serde(rename = "optional-type-names")]
    optional_type_names: Option<bool>,
    #[serde(rename = "optional-names")]
    optional_names: Option<bool>,
    #[serde(rename = "keyword-spacing")]
    keyword_spacing: Option<bool>,
    #[serde(rename = "developer")]
    developer: Option<String>,
    #[serde(rename = "company")]
    company: Option<String>,
}

impl DocFormat {
    pub fn new() -> Self {
        Self {
            tab_size: Some(2),
            use_tabs: Some(false),
            line_width: Some(80),
            flower_box_char: Some('-'),
            sub_header: Some(false),
            file_header: Some(vec![
                String::from("<%flowerfill%>"),
                String::from("<%filename%> - <%description%>"),
                String::from(""),
                String::from("Generated on <%datetime%> by <%appname%> <%appversion%>"),
                String::from("Developer : <%developer%>"),
                String::from("Company : <%company%>"),
                String::from("<%flowerfill%>"),
            ]),
            copyright: Some(String::from(
                "Copyright (c) <%year%> <%company%>. All rights reserved.",
            )),
            license: None,
            section_start: Some(String::from("[ <%param%> ]")),
            section_end: Some(String::from("[ /<%param%> ]")),
            optional_type_names: Some(true),
            optional_names: Some(true),
            keyword_spacing: Some(true),
            developer: None,
            company: None,
        }
    }

    /// Creates a configuration with every field unset.
    ///
    /// Useful as a merge target and for hosts that want to opt in to each
    /// knob explicitly.
    pub fn unset() -> Self {
        Self {
            tab_size: None,
            use_tabs: None,
            line_width: None,
            flower_box_char: None,
            sub_header: None,
            file_header: None,
            copyright: None,
            license: None,
            section_start: None,
            section_end: None,
            optional_type_names: None,
            optional_names: None,
            keyword_spacing: None,
            developer: None,
            company: None,
        }
    }

    pub fn get_tab_size(&self) -> u8 {
        self.tab_size.unwrap_or(2)
    }

    pub fn is_tabbed(&self) -> bool {
        self.use_tabs.unwrap_or(false)
    }

    pub fn get_line_width(&self) -> usize {
        self.line_width.unwrap_or(80) as usize
    }

    pub fn get_flower_box_char(&self) -> Option<char> {
        self.flower_box_char
    }

    pub fn is_sub_header_included(&self) -> bool {
        self.sub_header.unwrap_or(false)
    }

    pub fn get_file_header(&self) -> &[String] {
        self.file_header.as_deref().unwrap_or(&[])
    }

    pub fn get_copyright(&self) -> &str {
        self.copyright.as_deref().unwrap_or("")
    }

    pub fn get_license(&self) -> &[String] {
        self.license.as_deref().unwrap_or(&[])
    }

    pub fn get_section_start(&self) -> &str {
        self.section_start.as_deref().unwrap_or("")
    }

    pub fn get_section_end(&self) -> &str {
        self.section_end.as_deref().unwrap_or("")
    }

    pub fn is_optional_type_names_added(&self) -> bool {
        self.optional_type_names.unwrap_or(false)
    }

    pub fn is_optional_names_added(&self) -> bool {
        self.optional_names.unwrap_or(false)
    }

    pub fn is_keyword_spaced(&self) -> bool {
        self.keyword_spacing.unwrap_or(true)
    }

    pub fn get_developer(&self) -> &str {
        self.developer.as_deref().unwrap_or("")
    }

    pub fn get_company(&self) -> &str {
        self.company.as_deref().unwrap_or("")
    }

    /// Produces the whitespace for one step of indentation.
    pub fn get_indent_unit(&self) -> String {
        match self.is_tabbed() {
            true => String::from("\t"),
            false => " ".repeat(self.get_tab_size() as usize),
        }
    }

    /// Produces the whitespace leading a line nested `level` steps deep.
    pub fn get_indent(&self, level: usize) -> String {
        self.get_indent_unit().repeat(level)
    }

    /// Builds a run of the flower-box character that fills the line width
    /// after `consumed` columns are already taken.
    ///
    /// Yields an empty string when no flower-box character is configured.
    pub fn get_flower_fill(&self, consumed: usize) -> String {
        match self.get_flower_box_char() {
            Some(c) => {
                let count = self.get_line_width().saturating_sub(consumed);
                std::iter::repeat(c).take(count).collect()
            }
            None => String::new(),
        }
    }

    /// Builds the `end` line for a construct, honoring the optional keyword
    /// and name suffixes.
    pub fn get_end_line(&self, kind: &str, name: &str) -> String {
        let mut line = String::from("end");
        if self.is_optional_type_names_added() == true {
            line.push(' ');
            line.push_str(kind);
        }
        if self.is_optional_names_added() == true {
            line.push(' ');
            line.push_str(name);
        }
        line.push(';');
        line
    }

    /// The separator between a keyword and its opening parenthesis.
    pub fn get_keyword_spacing(&self) -> &str {
        match self.is_keyword_spaced() {
            true => " ",
            false => "",
        }
    }

    /// Merges any populated data from `rhs` into attributes that do not
    /// already have data defined in `self`.
    pub fn merge(&mut self, rhs: Option<Self>) -> () {
        if let Some(rhs) = rhs {
            if self.tab_size.is_some() == false {
                self.tab_size = rhs.tab_size
            }
            if self.use_tabs.is_some() == false {
                self.use_tabs = rhs.use_tabs
            }
            if self.line_width.is_some() == false {
                self.line_width = rhs.line_width
            }
            if self.flower_box_char.is_some() == false {
                self.flower_box_char = rhs.flower_box_char
            }
            if self.sub_header.is_some() == false {
                self.sub_header = rhs.sub_header
            }
            if self.file_header.is_some() == false {
                self.file_header = rhs.file_header
            }
            if self.copyright.is_some() == false {
                self.copyright = rhs.copyright
            }
            if self.license.is_some() == false {
                self.license = rhs.license
            }
            if self.section_start.is_some() == false {
                self.section_start = rhs.section_start
            }
            if self.section_end.is_some() == false {
                self.section_end = rhs.section_end
            }
            if self.optional_type_names.is_some() == false {
                self.optional_type_names = rhs.optional_type_names
            }
            if self.optional_names.is_some() == false {
                self.optional_names = rhs.optional_names
            }
            if self.keyword_spacing.is_some() == false {
                self.keyword_spacing = rhs.keyword_spacing
            }
            if self.developer.is_some() == false {
                self.developer = rhs.developer
            }
            if self.company.is_some() == false {
                self.company = rhs.company
            }
        }
    }

    // builder-style setters so a host can assemble a configuration without
    // going through deserialization

    pub fn tab_size(mut self, size: u8) -> Self {
        self.tab_size = Some(size);
        self
    }

    pub fn use_tabs(mut self, tabbed: bool) -> Self {
        self.use_tabs = Some(tabbed);
        self
    }

    pub fn line_width(mut self, width: u16) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn flower_box_char(mut self, c: Option<char>) -> Self {
        self.flower_box_char = c;
        self
    }

    pub fn sub_header(mut self, included: bool) -> Self {
        self.sub_header = Some(included);
        self
    }

    pub fn file_header(mut self, lines: Vec<String>) -> Self {
        self.file_header = Some(lines);
        self
    }

    pub fn copyright(mut self, template: &str) -> Self {
        self.copyright = Some(template.to_string());
        self
    }

    pub fn license(mut self, lines: Vec<String>) -> Self {
        self.license = Some(lines);
        self
    }

    pub fn section_start(mut self, template: &str) -> Self {
        self.section_start = Some(template.to_string());
        self
    }

    pub fn section_end(mut self, template: &str) -> Self {
        self.section_end = Some(template.to_string());
        self
    }

    pub fn optional_type_names(mut self, added: bool) -> Self {
        self.optional_type_names = Some(added);
        self
    }

    pub fn optional_names(mut self, added: bool) -> Self {
        self.optional_names = Some(added);
        self
    }

    pub fn keyword_spacing(mut self, spaced: bool) -> Self {
        self.keyword_spacing = Some(spaced);
        self
    }

    pub fn developer(mut self, name: &str) -> Self {
        self.developer = Some(name.to_string());
        self
    }

    pub fn company(mut self, name: &str) -> Self {
        self.company = Some(name.to_string());
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let fmt = DocFormat::new();
        assert_eq!(fmt.get_tab_size(), 2);
        assert_eq!(fmt.is_tabbed(), false);
        assert_eq!(fmt.get_line_width(), 80);
        assert_eq!(fmt.get_flower_box_char(), Some('-'));
        assert_eq!(fmt.is_sub_header_included(), false);
        assert_eq!(fmt.is_keyword_spaced(), true);
        assert_eq!(fmt.get_license().is_empty(), true);
    }

    #[test]
    fn unset_falls_back() {
        let fmt = DocFormat::unset();
        assert_eq!(fmt.get_tab_size(), 2);
        assert_eq!(fmt.get_flower_box_char(), None);
        assert_eq!(fmt.get_file_header().is_empty(), true);
        assert_eq!(fmt.get_copyright(), "");
        // suffixes are off until enabled
        assert_eq!(fmt.get_end_line("entity", "alu"), "end;");
    }

    #[test]
    fn merge_fills_gaps() {
        let mut fmt = DocFormat::unset().tab_size(8).developer("RB");
        fmt.merge(Some(DocFormat::new().company("VDLC")));
        // existing data wins
        assert_eq!(fmt.get_tab_size(), 8);
        assert_eq!(fmt.get_developer(), "RB");
        // gaps are taken from the merged instance
        assert_eq!(fmt.get_company(), "VDLC");
        assert_eq!(fmt.get_flower_box_char(), Some('-'));
    }

    #[test]
    fn indentation() {
        let fmt = DocFormat::new().tab_size(4);
        assert_eq!(fmt.get_indent(0), "");
        assert_eq!(fmt.get_indent(2), "        ");

        let fmt = fmt.use_tabs(true);
        assert_eq!(fmt.get_indent(2), "\t\t");
    }

    #[test]
    fn flower_fill() {
        let fmt = DocFormat::new().line_width(10).flower_box_char(Some('*'));
        assert_eq!(fmt.get_flower_fill(3), "*******");
        let bare = fmt.flower_box_char(None);
        assert_eq!(bare.get_flower_fill(3), "");
    }

    #[test]
    fn end_lines() {
        let fmt = DocFormat::new();
        assert_eq!(fmt.get_end_line("entity", "alu"), "end entity alu;");
        let fmt = fmt.optional_type_names(false);
        assert_eq!(fmt.get_end_line("entity", "alu"), "end alu;");
        let fmt = fmt.optional_names(false);
        assert_eq!(fmt.get_end_line("entity", "alu"), "end;");
    }
}
