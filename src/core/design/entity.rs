use std::fmt::Display;

use super::{verify_filled, Document};
use crate::core::format::DocFormat;
use crate::core::wrap::{comment_lines, longest_identifier, push_line};
use crate::error::Error;

/// Direction of a port.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Mode {
    In,
    Out,
    Inout,
    Buffer,
    Linkage,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Inout => "inout",
            Self::Buffer => "buffer",
            Self::Linkage => "linkage",
        };
        write!(f, "{}", keyword)
    }
}

/// An entity generic: a compile-time parameter with an optional default.
#[derive(Debug, PartialEq)]
pub struct Generic {
    name: String,
    description: String,
    remarks: Option<String>,
    datatype: String,
    default: Option<String>,
}

impl Generic {
    pub fn new(name: &str, datatype: &str, description: &str) -> Result<Self, Error> {
        verify_filled("generic", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            datatype: datatype.to_string(),
            default: None,
        })
    }

    pub fn default_value(mut self, expr: &str) -> Self {
        self.default = Some(expr.to_string());
        self
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn get_datatype(&self) -> &str {
        &self.datatype
    }

    /// Creates the declaration text, padding the identifier out to `offset`
    /// so the colons of one interface list line up.
    pub fn to_declaration_string(&self, offset: usize) -> String {
        let mut line = format!("{:<width$} : {}", self.name, self.datatype, width = offset);
        if let Some(expr) = &self.default {
            line.push_str(&format!(" := {}", expr));
        }
        line
    }
}

impl Document for Generic {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn get_description(&self) -> &str {
        &self.description
    }

    fn get_remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

/// An entity port: a directed signal of the module boundary.
#[derive(Debug, PartialEq)]
pub struct Port {
    name: String,
    description: String,
    remarks: Option<String>,
    mode: Mode,
    datatype: String,
    default: Option<String>,
}

impl Port {
    pub fn new(name: &str, mode: Mode, datatype: &str, description: &str) -> Result<Self, Error> {
        verify_filled("port", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            mode: mode,
            datatype: datatype.to_string(),
            default: None,
        })
    }

    pub fn default_value(mut self, expr: &str) -> Self {
        self.default = Some(expr.to_string());
        self
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn get_datatype(&self) -> &str {
        &self.datatype
    }

    /// Creates the declaration text, padding the identifier out to `offset`
    /// so the colons of one interface list line up.
    pub fn to_declaration_string(&self, offset: usize) -> String {
        let mut line = format!(
            "{:<width$} : {} {}",
            self.name,
            self.mode,
            self.datatype,
            width = offset
        );
        if let Some(expr) = &self.default {
            line.push_str(&format!(" := {}", expr));
        }
        line
    }
}

impl Document for Port {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn get_description(&self) -> &str {
        &self.description
    }

    fn get_remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

/// The externally visible boundary of the module: a name plus its generic
/// and port interface lists.
#[derive(Debug, PartialEq)]
pub struct Entity {
    name: String,
    description: String,
    remarks: Option<String>,
    generics: Vec<Generic>,
    ports: Vec<Port>,
}

impl Entity {
    pub fn new(name: &str, description: &str) -> Result<Self, Error> {
        verify_filled("entity", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            generics: Vec::new(),
            ports: Vec::new(),
        })
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn add_generic(&mut self, generic: Generic) -> () {
        self.generics.push(generic);
    }

    pub fn add_port(&mut self, port: Port) -> () {
        self.ports.push(port);
    }

    pub fn get_generics(&self) -> &[Generic] {
        &self.generics
    }

    pub fn get_ports(&self) -> &[Port] {
        &self.ports
    }
}

impl Document for Entity {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn get_description(&self) -> &str {
        &self.description
    }

    fn get_remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

/// Renders a `generic ( ... )` interface list: one documentation comment per
/// entry followed by its declaration, colons aligned across the list.
pub(crate) fn generic_list(generics: &[Generic], level: usize, fmt: &DocFormat) -> Vec<String> {
    interface_list(
        "generic",
        generics,
        |g, offset| g.to_declaration_string(offset),
        level,
        fmt,
    )
}

/// Renders a `port ( ... )` interface list.
pub(crate) fn port_list(ports: &[Port], level: usize, fmt: &DocFormat) -> Vec<String> {
    interface_list(
        "port",
        ports,
        |p, offset| p.to_declaration_string(offset),
        level,
        fmt,
    )
}

fn interface_list<T: Document>(
    keyword: &str,
    items: &[T],
    declare: impl Fn(&T, usize) -> String,
    level: usize,
    fmt: &DocFormat,
) -> Vec<String> {
    let mut lines = Vec::new();
    if items.is_empty() == true {
        return lines;
    }
    push_line(
        &mut lines,
        &format!("{}{}(", keyword, fmt.get_keyword_spacing()),
        level,
        fmt,
    );
    // auto-align by first finding the longest identifier
    let offset = longest_identifier(items.iter().map(|i| i.get_name()));
    for (i, item) in items.iter().enumerate() {
        lines.append(&mut comment_lines(&item.to_doc_string(), level + 1, fmt));
        let mut text = declare(item, offset);
        if i + 1 < items.len() {
            text.push(';');
        }
        push_line(&mut lines, &text, level + 1, fmt);
    }
    push_line(&mut lines, ");", level, fmt);
    lines
}
