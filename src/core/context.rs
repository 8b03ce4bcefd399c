use std::collections::HashMap;

use chrono::{DateTime, Local};

use super::format::DocFormat;
use super::wrap::COMMENT_STR;

/// The wall-clock instant sampled once per generation run.
///
/// Every date/time tag within one run resolves against the same instant so
/// a document never straddles a second (or a year) boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Moment(DateTime<Local>);

impl Moment {
    /// Samples the system clock.
    pub fn now() -> Self {
        Self(Local::now())
    }

    /// Wraps a known instant, letting tests pin the clock.
    pub fn from_datetime(instant: DateTime<Local>) -> Self {
        Self(instant)
    }

    pub fn get_year(&self) -> String {
        self.0.format("%Y").to_string()
    }

    pub fn get_date(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    pub fn get_time(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }

    pub fn get_datetime(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Identifies the generating application and the target library.
#[derive(Debug, PartialEq, Clone)]
pub struct Identity {
    app_name: String,
    app_version: String,
    library_name: String,
    library_version: String,
}

impl Identity {
    pub fn new() -> Self {
        Self {
            app_name: String::from(env!("CARGO_PKG_NAME")),
            app_version: String::from(env!("CARGO_PKG_VERSION")),
            library_name: String::from("work"),
            library_version: String::new(),
        }
    }

    pub fn application(mut self, name: &str, version: &str) -> Self {
        self.app_name = name.to_string();
        self.app_version = version.to_string();
        self
    }

    pub fn library(mut self, name: &str, version: &str) -> Self {
        self.library_name = name.to_string();
        self.library_version = version.to_string();
        self
    }

    pub fn get_app_name(&self) -> &str {
        &self.app_name
    }

    pub fn get_app_version(&self) -> &str {
        &self.app_version
    }

    pub fn get_library_name(&self) -> &str {
        &self.library_name
    }

    pub fn get_library_version(&self) -> &str {
        &self.library_version
    }
}

/// Lookup table mapping tag names to their resolved values for one run.
///
/// Load order fixes precedence: generic tags are loaded first, then the
/// global tags, then any item-specific tags, so a later scope silently
/// overrides an earlier one on a name collision.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMap(HashMap<String, String>);

impl TagMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Loads the generic date/time tags from the sampled instant.
    pub fn load_moment(mut self, moment: &Moment) -> Self {
        self.add("year", &moment.get_year());
        self.add("date", &moment.get_date());
        self.add("time", &moment.get_time());
        self.add("datetime", &moment.get_datetime());
        self
    }

    /// Loads the global application and library identity tags.
    pub fn load_identity(mut self, identity: &Identity) -> Self {
        self.add("appname", identity.get_app_name());
        self.add("appversion", identity.get_app_version());
        self.add("libraryname", identity.get_library_name());
        self.add("libraryversion", identity.get_library_version());
        self
    }

    /// Loads the global tags owned by the formatting configuration.
    ///
    /// The `flowerfill` tag is sized to complete a line that already starts
    /// with the comment marker.
    pub fn load_format(mut self, fmt: &DocFormat) -> Self {
        self.add("developer", fmt.get_developer());
        self.add("company", fmt.get_company());
        self.add("flowerfill", &fmt.get_flower_fill(COMMENT_STR.len()));
        self
    }

    pub fn add(&mut self, key: &str, value: &str) -> Option<String> {
        self.0.insert(key.to_string(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn fixed_moment() -> Moment {
        Moment::from_datetime(Local.with_ymd_and_hms(2024, 7, 8, 13, 5, 59).unwrap())
    }

    #[test]
    fn moment_formats() {
        let m = fixed_moment();
        assert_eq!(m.get_year(), "2024");
        assert_eq!(m.get_date(), "2024-07-08");
        assert_eq!(m.get_time(), "13:05:59");
        assert_eq!(m.get_datetime(), "2024-07-08 13:05:59");
    }

    #[test]
    fn generic_tags() {
        let tags = TagMap::new().load_moment(&fixed_moment());
        assert_eq!(tags.get("year").unwrap(), "2024");
        assert_eq!(tags.get("datetime").unwrap(), "2024-07-08 13:05:59");
        assert_eq!(tags.get("developer"), None);
    }

    #[test]
    fn identity_tags() {
        let identity = Identity::new().library("gates", "1.0.2");
        let tags = TagMap::new().load_identity(&identity);
        assert_eq!(tags.get("appname").unwrap(), "stencil");
        assert_eq!(tags.get("libraryname").unwrap(), "gates");
        assert_eq!(tags.get("libraryversion").unwrap(), "1.0.2");
    }

    #[test]
    fn later_scopes_override_earlier_ones() {
        let fmt = DocFormat::new().developer("global dev");
        let mut tags = TagMap::new().load_moment(&fixed_moment()).load_format(&fmt);
        assert_eq!(tags.get("developer").unwrap(), "global dev");
        // the item scope wins over the global scope
        tags.add("developer", "item dev");
        assert_eq!(tags.get("developer").unwrap(), "item dev");
    }

    #[test]
    fn flowerfill_completes_the_comment_line() {
        let fmt = DocFormat::new().line_width(20).flower_box_char(Some('-'));
        let tags = TagMap::new().load_format(&fmt);
        assert_eq!(tags.get("flowerfill").unwrap(), "-----------------");

        let fmt = fmt.flower_box_char(None);
        let tags = TagMap::new().load_format(&fmt);
        assert_eq!(tags.get("flowerfill").unwrap(), "");
    }
}
