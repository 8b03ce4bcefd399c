use super::{verify_filled, Document};
use crate::error::Error;

/// Flavor of a declared type entry.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DeclarationKind {
    Constant,
    Subtype,
    Type,
}

/// A constant/subtype/type declaration in the architecture declarative part.
///
/// Declarations may reference one another; the dependency set holds indices
/// into the module's flat declaration list and the generator guarantees
/// every dependency is emitted first.
#[derive(Debug, PartialEq)]
pub struct Declaration {
    name: String,
    description: String,
    remarks: Option<String>,
    kind: DeclarationKind,
    datatype: String,
    default: Option<String>,
    depends_on: Vec<usize>,
}

impl Declaration {
    pub fn new(
        kind: DeclarationKind,
        name: &str,
        datatype: &str,
        description: &str,
    ) -> Result<Self, Error> {
        verify_filled("declaration", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            kind: kind,
            datatype: datatype.to_string(),
            default: None,
            depends_on: Vec::new(),
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

    /// Records the declarations this one must be emitted after.
    pub fn depends_on(mut self, deps: &[usize]) -> Self {
        self.depends_on.extend_from_slice(deps);
        self
    }

    pub fn get_kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn get_datatype(&self) -> &str {
        &self.datatype
    }

    pub fn get_dependencies(&self) -> &[usize] {
        &self.depends_on
    }

    /// Creates the declaration text. Constants pad their identifier out to
    /// `offset` so a column of constants aligns on the colon.
    pub fn to_declaration_string(&self, offset: usize) -> String {
        match self.kind {
            DeclarationKind::Constant => {
                let mut line = format!(
                    "constant {:<width$} : {}",
                    self.name,
                    self.datatype,
                    width = offset
                );
                if let Some(expr) = &self.default {
                    line.push_str(&format!(" := {}", expr));
                }
                line.push(';');
                line
            }
            DeclarationKind::Subtype => {
                format!("subtype {} is {};", self.name, self.datatype)
            }
            DeclarationKind::Type => {
                format!("type {} is {};", self.name, self.datatype)
            }
        }
    }
}

impl Document for Declaration {
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

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constant_declaration() {
        let d = Declaration::new(DeclarationKind::Constant, "DEPTH", "natural", "fifo depth")
            .unwrap()
            .default_value("16");
        assert_eq!(
            d.to_declaration_string(5),
            "constant DEPTH : natural := 16;"
        );
    }

    #[test]
    fn subtype_declaration() {
        let d = Declaration::new(
            DeclarationKind::Subtype,
            "word_t",
            "std_logic_vector(7 downto 0)",
            "one data word",
        )
        .unwrap();
        assert_eq!(
            d.to_declaration_string(0),
            "subtype word_t is std_logic_vector(7 downto 0);"
        );
    }

    #[test]
    fn type_declaration() {
        let d = Declaration::new(DeclarationKind::Type, "state_t", "(idle, run, halt)", "fsm states")
            .unwrap();
        assert_eq!(d.to_declaration_string(0), "type state_t is (idle, run, halt);");
    }

    #[test]
    fn dependency_set() {
        let d = Declaration::new(DeclarationKind::Type, "line_t", "array of word_t", "text line")
            .unwrap()
            .depends_on(&[0, 2]);
        assert_eq!(d.get_dependencies(), &[0, 2]);
    }
}
