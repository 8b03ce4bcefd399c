//! Plain-data descriptions of the constructs a module file is built from.
//!
//! Values are fully populated by the caller before generation and only read
//! afterwards; the text fields inside (datatypes, default expressions,
//! statement bodies) are opaque fragments copied through by the engine.

mod declaration;
mod entity;
mod items;

pub use declaration::{Declaration, DeclarationKind};
pub(crate) use entity::{generic_list, port_list};
pub use entity::{Entity, Generic, Mode, Port};
pub use items::{
    Alias, Attribute, Component, Function, Generate, Instance, Procedure, Process, Signal,
};

use crate::error::Error;

/// Common read surface every documented construct provides.
pub trait Document {
    fn get_name(&self) -> &str;

    fn get_description(&self) -> &str;

    fn get_remarks(&self) -> Option<&str> {
        None
    }

    /// Builds the one-line documentation comment content.
    fn to_doc_string(&self) -> String {
        format!("{} - {}", self.get_name(), self.get_description())
    }
}

/// Verifies the required text fields of a construct at construction time.
pub(super) fn verify_filled(kind: &str, name: &str, description: &str) -> Result<(), Error> {
    if name.trim().is_empty() == true {
        return Err(Error::EmptyName(kind.to_string()));
    }
    if description.trim().is_empty() == true {
        return Err(Error::EmptyDescription(
            kind.to_string(),
            name.to_string(),
        ));
    }
    Ok(())
}

/// The complete description of one module file.
///
/// Collections keep caller insertion order; the generator reorders only the
/// declarations, and only by their dependency relationships.
#[derive(Debug, PartialEq)]
pub struct Module {
    entity: Entity,
    architecture: String,
    uses: Vec<String>,
    declarations: Vec<Declaration>,
    functions: Vec<Function>,
    procedures: Vec<Procedure>,
    components: Vec<Component>,
    signals: Vec<Signal>,
    aliases: Vec<Alias>,
    attributes: Vec<Attribute>,
    processes: Vec<Process>,
    generates: Vec<Generate>,
    instances: Vec<Instance>,
}

impl Module {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity: entity,
            architecture: String::from("rtl"),
            uses: Vec::new(),
            declarations: Vec::new(),
            functions: Vec::new(),
            procedures: Vec::new(),
            components: Vec::new(),
            signals: Vec::new(),
            aliases: Vec::new(),
            attributes: Vec::new(),
            processes: Vec::new(),
            generates: Vec::new(),
            instances: Vec::new(),
        }
    }

    /// Renames the architecture body (the default is `rtl`).
    pub fn architecture(mut self, name: &str) -> Self {
        self.architecture = name.to_string();
        self
    }

    /// Appends a library/use clause emitted verbatim near the file top.
    pub fn add_use(&mut self, clause: &str) -> () {
        self.uses.push(clause.to_string());
    }

    /// Appends a declaration and returns its index for use in dependency
    /// sets of later declarations.
    pub fn add_declaration(&mut self, declaration: Declaration) -> usize {
        self.declarations.push(declaration);
        self.declarations.len() - 1
    }

    pub fn add_function(&mut self, function: Function) -> () {
        self.functions.push(function);
    }

    pub fn add_procedure(&mut self, procedure: Procedure) -> () {
        self.procedures.push(procedure);
    }

    pub fn add_component(&mut self, component: Component) -> () {
        self.components.push(component);
    }

    pub fn add_signal(&mut self, signal: Signal) -> () {
        self.signals.push(signal);
    }

    pub fn add_alias(&mut self, alias: Alias) -> () {
        self.aliases.push(alias);
    }

    pub fn add_attribute(&mut self, attribute: Attribute) -> () {
        self.attributes.push(attribute);
    }

    pub fn add_process(&mut self, process: Process) -> () {
        self.processes.push(process);
    }

    pub fn add_generate(&mut self, generate: Generate) -> () {
        self.generates.push(generate);
    }

    pub fn add_instance(&mut self, instance: Instance) -> () {
        self.instances.push(instance);
    }

    pub fn get_entity(&self) -> &Entity {
        &self.entity
    }

    pub fn get_architecture(&self) -> &str {
        &self.architecture
    }

    pub fn get_uses(&self) -> &[String] {
        &self.uses
    }

    pub fn get_declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn get_functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn get_procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    pub fn get_components(&self) -> &[Component] {
        &self.components
    }

    pub fn get_signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn get_aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn get_attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get_processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn get_generates(&self) -> &[Generate] {
        &self.generates
    }

    pub fn get_instances(&self) -> &[Instance] {
        &self.instances
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn required_fields() {
        assert_eq!(
            verify_filled("signal", "", "counter register"),
            Err(Error::EmptyName(String::from("signal")))
        );
        assert_eq!(
            verify_filled("signal", "   ", "counter register"),
            Err(Error::EmptyName(String::from("signal")))
        );
        assert_eq!(
            verify_filled("signal", "count", " "),
            Err(Error::EmptyDescription(
                String::from("signal"),
                String::from("count")
            ))
        );
        assert_eq!(verify_filled("signal", "count", "counter register"), Ok(()));
    }

    #[test]
    fn declaration_indices() {
        let entity = Entity::new("alu", "arithmetic logic unit").unwrap();
        let mut module = Module::new(entity);
        let z = module
            .add_declaration(Declaration::new(DeclarationKind::Type, "op_t", "(add, sub)", "opcode").unwrap());
        let y = module.add_declaration(
            Declaration::new(DeclarationKind::Subtype, "word_t", "std_logic_vector(7 downto 0)", "data word")
                .unwrap()
                .depends_on(&[z]),
        );
        assert_eq!(z, 0);
        assert_eq!(y, 1);
        assert_eq!(module.get_declarations()[y].get_dependencies(), &[0]);
    }

    #[test]
    fn architecture_rename() {
        let entity = Entity::new("alu", "arithmetic logic unit").unwrap();
        let module = Module::new(entity).architecture("behav");
        assert_eq!(module.get_architecture(), "behav");
    }
}
