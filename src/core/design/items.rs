use super::entity::{generic_list, port_list, Generic, Port};
use super::{verify_filled, Document};
use crate::core::format::DocFormat;
use crate::core::wrap::{longest_identifier, push_line};
use crate::error::Error;

/// An internal signal of the architecture.
#[derive(Debug, PartialEq)]
pub struct Signal {
    name: String,
    description: String,
    remarks: Option<String>,
    datatype: String,
    default: Option<String>,
}

impl Signal {
    pub fn new(name: &str, datatype: &str, description: &str) -> Result<Self, Error> {
        verify_filled("signal", name, description)?;
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

    pub fn to_declaration_string(&self, offset: usize) -> String {
        let mut line = format!(
            "signal {:<width$} : {}",
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
}

impl Document for Signal {
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

/// An alternate name for an existing object.
#[derive(Debug, PartialEq)]
pub struct Alias {
    name: String,
    description: String,
    remarks: Option<String>,
    target: String,
}

impl Alias {
    pub fn new(name: &str, target: &str, description: &str) -> Result<Self, Error> {
        verify_filled("alias", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            target: target.to_string(),
        })
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn to_declaration_string(&self) -> String {
        format!("alias {} is {};", self.name, self.target)
    }
}

impl Document for Alias {
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

/// A user-defined attribute declaration.
#[derive(Debug, PartialEq)]
pub struct Attribute {
    name: String,
    description: String,
    remarks: Option<String>,
    datatype: String,
}

impl Attribute {
    pub fn new(name: &str, datatype: &str, description: &str) -> Result<Self, Error> {
        verify_filled("attribute", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            datatype: datatype.to_string(),
        })
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn to_declaration_string(&self) -> String {
        format!("attribute {} : {};", self.name, self.datatype)
    }
}

impl Document for Attribute {
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

/// A function of the architecture declarative part.
///
/// The argument list and statement lines are opaque fragments supplied by
/// the caller; the engine indents and wraps them without interpretation.
#[derive(Debug, PartialEq)]
pub struct Function {
    name: String,
    description: String,
    remarks: Option<String>,
    arguments: Option<String>,
    returns: String,
    statements: Vec<String>,
}

impl Function {
    pub fn new(name: &str, returns: &str, description: &str) -> Result<Self, Error> {
        verify_filled("function", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            arguments: None,
            returns: returns.to_string(),
            statements: Vec::new(),
        })
    }

    pub fn arguments(mut self, list: &str) -> Self {
        self.arguments = Some(list.to_string());
        self
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn add_statement(&mut self, line: &str) -> () {
        self.statements.push(line.to_string());
    }

    pub fn to_lines(&self, level: usize, fmt: &DocFormat) -> Vec<String> {
        let mut lines = Vec::new();
        let header = match &self.arguments {
            Some(args) => format!("function {}({}) return {} is", self.name, args, self.returns),
            None => format!("function {} return {} is", self.name, self.returns),
        };
        push_line(&mut lines, &header, level, fmt);
        push_line(&mut lines, "begin", level, fmt);
        for stmt in &self.statements {
            push_line(&mut lines, stmt, level + 1, fmt);
        }
        push_line(&mut lines, &fmt.get_end_line("function", &self.name), level, fmt);
        lines
    }
}

impl Document for Function {
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

/// A procedure of the architecture declarative part.
#[derive(Debug, PartialEq)]
pub struct Procedure {
    name: String,
    description: String,
    remarks: Option<String>,
    arguments: Option<String>,
    statements: Vec<String>,
}

impl Procedure {
    pub fn new(name: &str, description: &str) -> Result<Self, Error> {
        verify_filled("procedure", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            arguments: None,
            statements: Vec::new(),
        })
    }

    pub fn arguments(mut self, list: &str) -> Self {
        self.arguments = Some(list.to_string());
        self
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn add_statement(&mut self, line: &str) -> () {
        self.statements.push(line.to_string());
    }

    pub fn to_lines(&self, level: usize, fmt: &DocFormat) -> Vec<String> {
        let mut lines = Vec::new();
        let header = match &self.arguments {
            Some(args) => format!("procedure {}({}) is", self.name, args),
            None => format!("procedure {} is", self.name),
        };
        push_line(&mut lines, &header, level, fmt);
        push_line(&mut lines, "begin", level, fmt);
        for stmt in &self.statements {
            push_line(&mut lines, stmt, level + 1, fmt);
        }
        push_line(&mut lines, &fmt.get_end_line("procedure", &self.name), level, fmt);
        lines
    }
}

impl Document for Procedure {
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

/// A labeled process statement with its sensitivity list.
#[derive(Debug, PartialEq)]
pub struct Process {
    name: String,
    description: String,
    remarks: Option<String>,
    sensitivity: Vec<String>,
    statements: Vec<String>,
}

impl Process {
    pub fn new(name: &str, description: &str) -> Result<Self, Error> {
        verify_filled("process", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            sensitivity: Vec::new(),
            statements: Vec::new(),
        })
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn add_sensitivity(&mut self, signal: &str) -> () {
        self.sensitivity.push(signal.to_string());
    }

    pub fn add_statement(&mut self, line: &str) -> () {
        self.statements.push(line.to_string());
    }

    pub fn to_lines(&self, level: usize, fmt: &DocFormat) -> Vec<String> {
        let mut lines = Vec::new();
        let header = match self.sensitivity.is_empty() {
            true => format!("{} : process", self.name),
            false => format!(
                "{} : process{}({})",
                self.name,
                fmt.get_keyword_spacing(),
                self.sensitivity.join(", ")
            ),
        };
        push_line(&mut lines, &header, level, fmt);
        push_line(&mut lines, "begin", level, fmt);
        for stmt in &self.statements {
            push_line(&mut lines, stmt, level + 1, fmt);
        }
        // the process keyword is not optional on the closing line
        let end = match fmt.is_optional_names_added() {
            true => format!("end process {};", self.name),
            false => String::from("end process;"),
        };
        push_line(&mut lines, &end, level, fmt);
        lines
    }
}

impl Document for Process {
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

/// A labeled generate statement.
///
/// The generation scheme (`if ...` or `for ...`) is opaque caller text.
#[derive(Debug, PartialEq)]
pub struct Generate {
    name: String,
    description: String,
    remarks: Option<String>,
    scheme: String,
    statements: Vec<String>,
}

impl Generate {
    pub fn new(name: &str, scheme: &str, description: &str) -> Result<Self, Error> {
        verify_filled("generate", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            scheme: scheme.to_string(),
            statements: Vec::new(),
        })
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn add_statement(&mut self, line: &str) -> () {
        self.statements.push(line.to_string());
    }

    pub fn to_lines(&self, level: usize, fmt: &DocFormat) -> Vec<String> {
        let mut lines = Vec::new();
        push_line(
            &mut lines,
            &format!("{} : {} generate", self.name, self.scheme),
            level,
            fmt,
        );
        for stmt in &self.statements {
            push_line(&mut lines, stmt, level + 1, fmt);
        }
        let end = match fmt.is_optional_names_added() {
            true => format!("end generate {};", self.name),
            false => String::from("end generate;"),
        };
        push_line(&mut lines, &end, level, fmt);
        lines
    }
}

impl Document for Generate {
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

/// A component declaration mirroring the interface of a unit that will be
/// instantiated in the statement part.
#[derive(Debug, PartialEq)]
pub struct Component {
    name: String,
    description: String,
    remarks: Option<String>,
    generics: Vec<Generic>,
    ports: Vec<Port>,
}

impl Component {
    pub fn new(name: &str, description: &str) -> Result<Self, Error> {
        verify_filled("component", name, description)?;
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

    pub fn to_lines(&self, level: usize, fmt: &DocFormat) -> Vec<String> {
        let mut lines = Vec::new();
        push_line(&mut lines, &format!("component {}", self.name), level, fmt);
        lines.append(&mut generic_list(&self.generics, level + 1, fmt));
        lines.append(&mut port_list(&self.ports, level + 1, fmt));
        let end = match fmt.is_optional_names_added() {
            true => format!("end component {};", self.name),
            false => String::from("end component;"),
        };
        push_line(&mut lines, &end, level, fmt);
        lines
    }
}

impl Document for Component {
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

/// A labeled instantiation of a sub-module with its association lists.
#[derive(Debug, PartialEq)]
pub struct Instance {
    name: String,
    description: String,
    remarks: Option<String>,
    unit: String,
    generic_map: Vec<(String, String)>,
    port_map: Vec<(String, String)>,
}

impl Instance {
    pub fn new(name: &str, unit: &str, description: &str) -> Result<Self, Error> {
        verify_filled("instance", name, description)?;
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            remarks: None,
            unit: unit.to_string(),
            generic_map: Vec::new(),
            port_map: Vec::new(),
        })
    }

    pub fn remarks(mut self, text: &str) -> Self {
        self.remarks = Some(text.to_string());
        self
    }

    pub fn map_generic(&mut self, formal: &str, actual: &str) -> () {
        self.generic_map.push((formal.to_string(), actual.to_string()));
    }

    pub fn map_port(&mut self, formal: &str, actual: &str) -> () {
        self.port_map.push((formal.to_string(), actual.to_string()));
    }

    pub fn to_lines(&self, level: usize, fmt: &DocFormat) -> Vec<String> {
        let mut lines = Vec::new();
        if self.generic_map.is_empty() == true && self.port_map.is_empty() == true {
            push_line(&mut lines, &format!("{} : {};", self.name, self.unit), level, fmt);
            return lines;
        }
        push_line(&mut lines, &format!("{} : {}", self.name, self.unit), level, fmt);
        let last_is_generic = self.port_map.is_empty();
        if self.generic_map.is_empty() == false {
            lines.append(&mut Self::map_lines(
                "generic map",
                &self.generic_map,
                last_is_generic,
                level + 1,
                fmt,
            ));
        }
        if self.port_map.is_empty() == false {
            lines.append(&mut Self::map_lines("port map", &self.port_map, true, level + 1, fmt));
        }
        lines
    }

    /// Renders one association list with the arrows aligned on the longest
    /// formal name.
    fn map_lines(
        keyword: &str,
        mappings: &[(String, String)],
        closes_statement: bool,
        level: usize,
        fmt: &DocFormat,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        push_line(
            &mut lines,
            &format!("{}{}(", keyword, fmt.get_keyword_spacing()),
            level,
            fmt,
        );
        let offset = longest_identifier(mappings.iter().map(|(formal, _)| formal.as_str()));
        for (i, (formal, actual)) in mappings.iter().enumerate() {
            let mut text = format!("{:<width$} => {}", formal, actual, width = offset);
            if i + 1 < mappings.len() {
                text.push(',');
            }
            push_line(&mut lines, &text, level + 1, fmt);
        }
        let close = match closes_statement {
            true => ");",
            false => ")",
        };
        push_line(&mut lines, close, level, fmt);
        lines
    }
}

impl Document for Instance {
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
    use crate::core::design::Mode;

    #[test]
    fn signal_declaration() {
        let s = Signal::new("count", "unsigned(3 downto 0)", "cycle counter")
            .unwrap()
            .default_value("(others => '0')");
        assert_eq!(
            s.to_declaration_string(5),
            "signal count : unsigned(3 downto 0) := (others => '0');"
        );
    }

    #[test]
    fn alias_and_attribute_declarations() {
        let a = Alias::new("flags", "status(3 downto 0)", "status flag nibble").unwrap();
        assert_eq!(a.to_declaration_string(), "alias flags is status(3 downto 0);");

        let at = Attribute::new("keep", "boolean", "synthesis keep marker").unwrap();
        assert_eq!(at.to_declaration_string(), "attribute keep : boolean;");
    }

    #[test]
    fn function_block() {
        let fmt = DocFormat::new();
        let mut f = Function::new("parity", "std_logic", "xor reduction")
            .unwrap()
            .arguments("v : std_logic_vector");
        f.add_statement("return xor v;");
        assert_eq!(
            f.to_lines(1, &fmt),
            vec![
                "  function parity(v : std_logic_vector) return std_logic is",
                "  begin",
                "    return xor v;",
                "  end function parity;",
            ]
        );
    }

    #[test]
    fn process_block() {
        let fmt = DocFormat::new();
        let mut p = Process::new("sync", "registers the output").unwrap();
        p.add_sensitivity("clk");
        p.add_sensitivity("rst_n");
        p.add_statement("q <= d when rising_edge(clk);");
        assert_eq!(
            p.to_lines(1, &fmt),
            vec![
                "  sync : process (clk, rst_n)",
                "  begin",
                "    q <= d when rising_edge(clk);",
                "  end process sync;",
            ]
        );
    }

    #[test]
    fn process_block_unspaced_keyword() {
        let fmt = DocFormat::new().keyword_spacing(false).optional_names(false);
        let mut p = Process::new("sync", "registers the output").unwrap();
        p.add_sensitivity("clk");
        assert_eq!(
            p.to_lines(0, &fmt),
            vec!["sync : process(clk)", "begin", "end process;"]
        );
    }

    #[test]
    fn generate_block() {
        let fmt = DocFormat::new();
        let mut g = Generate::new("lanes", "for i in 0 to 3", "per lane wiring").unwrap();
        g.add_statement("q(i) <= d(i);");
        assert_eq!(
            g.to_lines(0, &fmt),
            vec![
                "lanes : for i in 0 to 3 generate",
                "  q(i) <= d(i);",
                "end generate lanes;",
            ]
        );
    }

    #[test]
    fn component_block() {
        let fmt = DocFormat::new();
        let mut c = Component::new("fifo", "clock crossing buffer").unwrap();
        c.add_port(Port::new("din", Mode::In, "std_logic", "input bit").unwrap());
        c.add_port(Port::new("dout", Mode::Out, "std_logic", "output bit").unwrap());
        assert_eq!(
            c.to_lines(0, &fmt),
            vec![
                "component fifo",
                "  port (",
                "    -- din - input bit",
                "    din  : in std_logic;",
                "    -- dout - output bit",
                "    dout : out std_logic",
                "  );",
                "end component fifo;",
            ]
        );
    }

    #[test]
    fn instance_block() {
        let fmt = DocFormat::new();
        let mut i = Instance::new("u0", "fifo", "receive buffer").unwrap();
        i.map_generic("WIDTH", "8");
        i.map_port("din", "rx_bit");
        i.map_port("dout", "data");
        assert_eq!(
            i.to_lines(1, &fmt),
            vec![
                "  u0 : fifo",
                "    generic map (",
                "      WIDTH => 8",
                "    )",
                "    port map (",
                "      din  => rx_bit,",
                "      dout => data",
                "    );",
            ]
        );
    }

    #[test]
    fn bare_instance() {
        let fmt = DocFormat::new();
        let i = Instance::new("u1", "sync_reset", "reset conditioner").unwrap();
        assert_eq!(i.to_lines(0, &fmt), vec!["u1 : sync_reset;"]);
    }
}
