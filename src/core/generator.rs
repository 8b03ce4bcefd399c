//! Assembles the final document from a module description.
//!
//! The walk order is fixed: file header, optional sub-header manifest,
//! copyright, license, use clauses, entity, then the architecture sections.
//! Nothing touches storage until the whole document is rendered.

use std::path::{Path, PathBuf};

use super::context::{Identity, Moment, TagMap};
use super::design::{generic_list, port_list, DeclarationKind, Document, Module};
use super::format::DocFormat;
use super::template::{Engine, COPYRIGHT_TAG, LICENSE_TAG};
use super::wrap;
use crate::error::{CycleList, Error, LastError};
use crate::util::graph::Graph;

/// Architecture section kinds in their fixed emission order.
#[derive(Debug, PartialEq, Clone, Copy)]
enum Section {
    Types,
    Functions,
    Procedures,
    Components,
    Signals,
    Aliases,
    Attributes,
    Processes,
    Generates,
    SubModules,
}

impl Section {
    fn get_title(&self) -> &'static str {
        match self {
            Self::Types => "Types",
            Self::Functions => "Functions",
            Self::Procedures => "Procedures",
            Self::Components => "Components",
            Self::Signals => "Signals",
            Self::Aliases => "Aliases",
            Self::Attributes => "Attributes",
            Self::Processes => "Processes",
            Self::Generates => "Generates",
            Self::SubModules => "Sub-modules",
        }
    }
}

/// Per-run expansion state shared by the emission helpers.
struct Scope<'a> {
    format: &'a DocFormat,
    tags: &'a TagMap,
    copyright: &'a str,
    license: &'a str,
}

impl Scope<'_> {
    fn expand(&self, text: &str) -> Result<String, Error> {
        Engine::new(self.tags)
            .boilerplate(self.copyright, self.license)
            .expand(text)
    }

    /// Expands with the section name bound to the `param` tag.
    fn expand_section(&self, text: &str, title: &str) -> Result<String, Error> {
        let mut scoped = self.tags.clone();
        scoped.add("param", title);
        Engine::new(&scoped)
            .boilerplate(self.copyright, self.license)
            .expand(text)
    }
}

/// One documented member of an architecture section, already rendered.
struct Member {
    doc: String,
    remarks: Option<String>,
    lines: Vec<String>,
}

/// Renders module descriptions into complete source files.
pub struct Generator<'a> {
    format: &'a DocFormat,
    identity: Identity,
}

impl<'a> Generator<'a> {
    pub fn new(format: &'a DocFormat) -> Self {
        Self {
            format: format,
            identity: Identity::new(),
        }
    }

    /// Swaps in the identity reported by the application/library tags.
    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Derives the output filename from the entity name.
    pub fn get_filename(module: &Module) -> String {
        format!("{}.vhd", module.get_entity().get_name().to_lowercase())
    }

    /// Renders the complete document, sampling the clock once for the run.
    pub fn generate(&self, module: &Module) -> Result<String, Error> {
        self.generate_at(module, &Moment::now())
    }

    /// Renders the complete document against a caller-provided instant.
    pub fn generate_at(&self, module: &Module, moment: &Moment) -> Result<String, Error> {
        let fmt = self.format;
        // item scope loads last so it wins over the global and generic tags
        let mut tags = TagMap::new()
            .load_moment(moment)
            .load_identity(&self.identity)
            .load_format(fmt);
        tags.add("filename", &Self::get_filename(module));
        tags.add("description", module.get_entity().get_description());

        let license = fmt.get_license().join("\n");
        let scope = Scope {
            format: fmt,
            tags: &tags,
            copyright: fmt.get_copyright(),
            license: &license,
        };

        let mut out: Vec<String> = Vec::new();
        emit_file_header(&mut out, &scope)?;
        if fmt.is_sub_header_included() == true {
            emit_sub_header(&mut out, module);
        }
        emit_tag_block(&mut out, &scope, COPYRIGHT_TAG)?;
        emit_tag_block(&mut out, &scope, LICENSE_TAG)?;
        emit_uses(&mut out, module);
        emit_entity(&mut out, module, fmt);
        emit_architecture(&mut out, module, &scope)?;

        let mut text = out.join("\n");
        text.push('\n');
        Ok(text)
    }

    /// Renders the document and writes it under `dest`.
    ///
    /// The contents are staged in a temporary file beside the target and
    /// moved into place only on full success, so a failed run never leaves
    /// a partial file behind.
    pub fn generate_to_dir(&self, module: &Module, dest: &Path) -> Result<PathBuf, Error> {
        let text = self.generate(module)?;
        let path = dest.join(Self::get_filename(module));
        let staged = tempfile::NamedTempFile::new_in(dest)
            .map_err(|e| Error::FileWrite(path.clone(), LastError(e.to_string())))?;
        std::fs::write(staged.path(), &text)
            .map_err(|e| Error::FileWrite(path.clone(), LastError(e.to_string())))?;
        staged
            .persist(&path)
            .map_err(|e| Error::FileWrite(path.clone(), LastError(e.to_string())))?;
        Ok(path)
    }
}

/// Separates two blocks with a single blank line.
fn gap(out: &mut Vec<String>) -> () {
    if let Some(last) = out.last() {
        if last.is_empty() == false {
            out.push(String::new());
        }
    }
}

fn emit_file_header(out: &mut Vec<String>, scope: &Scope) -> Result<(), Error> {
    for raw in scope.format.get_file_header() {
        if raw.is_empty() == true {
            // a deliberately blank comment line
            out.push(String::from("--"));
            continue;
        }
        let expanded = scope.expand(raw)?;
        // a line holding only tags that resolved to nothing is dropped
        if expanded.is_empty() == true {
            continue;
        }
        for piece in expanded.lines() {
            out.append(&mut wrap::comment_lines(piece, 0, scope.format));
        }
    }
    Ok(())
}

/// Emits the manifest of top-level constructs in declaration order.
fn emit_sub_header(out: &mut Vec<String>, module: &Module) -> () {
    gap(out);
    out.push(String::from("-- Contents:"));
    let mut entry = |kind: &str, name: &str| {
        out.push(format!("--   {:<12}{}", kind, name));
    };
    entry("entity", module.get_entity().get_name());
    for g in module.get_entity().get_generics() {
        entry("generic", g.get_name());
    }
    for p in module.get_entity().get_ports() {
        entry("port", p.get_name());
    }
    for d in module.get_declarations() {
        let kind = match d.get_kind() {
            DeclarationKind::Constant => "constant",
            DeclarationKind::Subtype => "subtype",
            DeclarationKind::Type => "type",
        };
        entry(kind, d.get_name());
    }
    for f in module.get_functions() {
        entry("function", f.get_name());
    }
    for p in module.get_procedures() {
        entry("procedure", p.get_name());
    }
    for c in module.get_components() {
        entry("component", c.get_name());
    }
    for s in module.get_signals() {
        entry("signal", s.get_name());
    }
    for a in module.get_aliases() {
        entry("alias", a.get_name());
    }
    for a in module.get_attributes() {
        entry("attribute", a.get_name());
    }
    for p in module.get_processes() {
        entry("process", p.get_name());
    }
    for g in module.get_generates() {
        entry("generate", g.get_name());
    }
    for i in module.get_instances() {
        entry("instance", i.get_name());
    }
}

/// Emits the expansion of a boilerplate template as a comment block.
///
/// An empty template is omitted entirely, leaving no residual blank lines.
fn emit_tag_block(out: &mut Vec<String>, scope: &Scope, tag: &str) -> Result<(), Error> {
    let template = match tag {
        COPYRIGHT_TAG => scope.copyright,
        _ => scope.license,
    };
    if template.is_empty() == true {
        return Ok(());
    }
    let text = scope.expand(&format!("<%{}%>", tag))?;
    gap(out);
    for line in text.lines() {
        out.append(&mut wrap::comment_lines(line, 0, scope.format));
    }
    Ok(())
}

fn emit_uses(out: &mut Vec<String>, module: &Module) -> () {
    if module.get_uses().is_empty() == true {
        return;
    }
    gap(out);
    for clause in module.get_uses() {
        out.push(clause.clone());
    }
}

fn emit_entity(out: &mut Vec<String>, module: &Module, fmt: &DocFormat) -> () {
    let entity = module.get_entity();
    gap(out);
    out.append(&mut wrap::comment_block(
        &entity.to_doc_string(),
        entity.get_remarks(),
        0,
        fmt,
    ));
    wrap::push_line(out, &format!("entity {} is", entity.get_name()), 0, fmt);
    out.append(&mut generic_list(entity.get_generics(), 1, fmt));
    out.append(&mut port_list(entity.get_ports(), 1, fmt));
    wrap::push_line(out, &fmt.get_end_line("entity", entity.get_name()), 0, fmt);
}

fn emit_architecture(out: &mut Vec<String>, module: &Module, scope: &Scope) -> Result<(), Error> {
    let fmt = scope.format;
    gap(out);
    wrap::push_line(
        out,
        &format!(
            "architecture {} of {} is",
            module.get_architecture(),
            module.get_entity().get_name()
        ),
        0,
        fmt,
    );

    // declarative part
    emit_types(out, module, scope)?;
    emit_section(
        out,
        scope,
        Section::Functions,
        collect(module.get_functions(), |f| f.to_lines(1, fmt)),
    )?;
    emit_section(
        out,
        scope,
        Section::Procedures,
        collect(module.get_procedures(), |p| p.to_lines(1, fmt)),
    )?;
    emit_section(
        out,
        scope,
        Section::Components,
        collect(module.get_components(), |c| c.to_lines(1, fmt)),
    )?;
    let offset = wrap::longest_identifier(module.get_signals().iter().map(|s| s.get_name()));
    emit_section(
        out,
        scope,
        Section::Signals,
        collect(module.get_signals(), |s| {
            let mut lines = Vec::new();
            wrap::push_line(&mut lines, &s.to_declaration_string(offset), 1, fmt);
            lines
        }),
    )?;
    emit_section(
        out,
        scope,
        Section::Aliases,
        collect(module.get_aliases(), |a| {
            let mut lines = Vec::new();
            wrap::push_line(&mut lines, &a.to_declaration_string(), 1, fmt);
            lines
        }),
    )?;
    emit_section(
        out,
        scope,
        Section::Attributes,
        collect(module.get_attributes(), |a| {
            let mut lines = Vec::new();
            wrap::push_line(&mut lines, &a.to_declaration_string(), 1, fmt);
            lines
        }),
    )?;

    gap(out);
    out.push(String::from("begin"));

    // statement part
    emit_section(
        out,
        scope,
        Section::Processes,
        collect(module.get_processes(), |p| p.to_lines(1, fmt)),
    )?;
    emit_section(
        out,
        scope,
        Section::Generates,
        collect(module.get_generates(), |g| g.to_lines(1, fmt)),
    )?;
    emit_section(
        out,
        scope,
        Section::SubModules,
        collect(module.get_instances(), |i| i.to_lines(1, fmt)),
    )?;

    gap(out);
    wrap::push_line(
        out,
        &fmt.get_end_line("architecture", module.get_architecture()),
        0,
        fmt,
    );
    Ok(())
}

/// Pairs every item with its rendered body lines.
fn collect<T: Document>(items: &[T], render: impl Fn(&T) -> Vec<String>) -> Vec<Member> {
    items
        .iter()
        .map(|item| Member {
            doc: item.to_doc_string(),
            remarks: item.get_remarks().map(|r| r.to_string()),
            lines: render(item),
        })
        .collect()
}

/// Emits the declared types in dependency order.
fn emit_types(out: &mut Vec<String>, module: &Module, scope: &Scope) -> Result<(), Error> {
    let decls = module.get_declarations();
    if decls.is_empty() == true {
        return Ok(());
    }
    let order = order_declarations(module)?;
    let fmt = scope.format;
    let offset = wrap::longest_identifier(decls.iter().map(|d| d.get_name()));
    let members = order
        .into_iter()
        .map(|i| {
            let d = &decls[i];
            let mut lines = Vec::new();
            wrap::push_line(&mut lines, &d.to_declaration_string(offset), 1, fmt);
            Member {
                doc: d.to_doc_string(),
                remarks: d.get_remarks().map(|r| r.to_string()),
                lines: lines,
            }
        })
        .collect();
    emit_section(out, scope, Section::Types, members)
}

/// Resolves the emission order of the declaration list.
fn order_declarations(module: &Module) -> Result<Vec<usize>, Error> {
    let decls = module.get_declarations();
    let mut graph = Graph::with_capacity(decls.len());
    for i in 0..decls.len() {
        graph.add_node(i);
    }
    for (i, d) in decls.iter().enumerate() {
        for dep in d.get_dependencies() {
            if graph.has_node(*dep) == false {
                return Err(Error::UnknownDependency(
                    d.get_name().to_string(),
                    *dep,
                    decls.len(),
                ));
            }
            // a declaration depending on itself is a cycle of one
            if *dep == i {
                return Err(Error::DependencyCycle(CycleList(vec![
                    d.get_name().to_string(),
                    d.get_name().to_string(),
                ])));
            }
            graph.add_edge(*dep, i);
        }
    }
    match graph.sort() {
        Ok(order) => Ok(order),
        Err(walk) => Err(Error::DependencyCycle(CycleList(
            walk.into_iter()
                .map(|i| decls[i].get_name().to_string())
                .collect(),
        ))),
    }
}

fn emit_section(
    out: &mut Vec<String>,
    scope: &Scope,
    section: Section,
    members: Vec<Member>,
) -> Result<(), Error> {
    if members.is_empty() == true {
        return Ok(());
    }
    let fmt = scope.format;
    gap(out);
    emit_banner(out, scope, fmt.get_section_start(), section.get_title())?;
    for member in members {
        gap(out);
        out.append(&mut wrap::comment_block(
            &member.doc,
            member.remarks.as_deref(),
            1,
            fmt,
        ));
        out.extend(member.lines);
    }
    gap(out);
    emit_banner(out, scope, fmt.get_section_end(), section.get_title())?;
    Ok(())
}

fn emit_banner(out: &mut Vec<String>, scope: &Scope, template: &str, title: &str) -> Result<(), Error> {
    if template.is_empty() == true {
        return Ok(());
    }
    let text = scope.expand_section(template, title)?;
    for line in text.lines() {
        out.append(&mut wrap::comment_lines(line, 1, scope.format));
    }
    Ok(())
}
