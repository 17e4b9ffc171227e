use std::fmt;

use javelin_flow::{Expression, Stmt};
use javelin_types::{capitalize, ClassType, JavaType};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(u32);

impl ModuleId {
    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

/// How a type declaration relates to the code around it. Decided once, when the module
/// is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Top-level class.
    Class,
    /// Top-level interface or annotation type.
    Interface,
    Enum,
    /// Non-static member class.
    LocalClass,
    StaticLocalClass,
    /// Interface declared inside another type.
    LocalInterface,
    /// Class declared inside a method body, or the body of an enum constant.
    InnerClass,
}

impl ModuleKind {
    #[must_use]
    pub fn is_interface(self) -> bool {
        matches!(self, Self::Interface | Self::LocalInterface)
    }
}

/// Method a module or body was declared in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodOwner {
    pub name: String,
    pub is_static: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    pub module: Option<ModuleId>,
    pub method: Option<MethodOwner>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: JavaType,
    pub initializer: Option<Expression>,
    pub comments: Vec<String>,
}

impl Field {
    /// Instance variable holding the field.
    #[must_use]
    pub fn ivar(&self) -> String {
        format!("@{}", self.name)
    }

    /// Class variable holding a static field.
    #[must_use]
    pub fn cvar(&self) -> String {
        format!("@@{}", self.name)
    }
}

/// A `static final` field, an interface constant or an enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    /// `None` for enum constants and their re-exports.
    pub ty: Option<JavaType>,
    pub value: Expression,
    pub comments: Vec<String>,
}

impl Constant {
    #[must_use]
    pub fn ruby_name(&self) -> String {
        capitalize(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: JavaType,
    pub variadic: bool,
}

/// Statements captured while the module graph is built and rendered afterwards.
///
/// The statements can be taken out exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBody(Option<Vec<Stmt>>);

impl PendingBody {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self(Some(stmts))
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The captured statements, or `None` if they were already taken.
    pub fn take(&mut self) -> Option<Vec<Stmt>> {
        self.0.take()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&[Stmt]> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn is_taken(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    Pending(PendingBody),
    Abstract,
    Native,
    /// Lines generated by the translator itself, e.g. enum helpers.
    Synthesized(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub is_static: bool,
    pub is_synchronized: bool,
    pub params: Vec<Param>,
    pub return_type: JavaType,
    pub generic_params: Vec<String>,
    pub body: MethodBody,
    /// Classes declared inside the body, in declaration order.
    pub local_classes: Vec<ModuleId>,
    pub comments: Vec<String>,
}

impl Method {
    pub(crate) fn synthesized(
        name: &str,
        is_static: bool,
        params: Vec<Param>,
        return_type: JavaType,
        lines: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            is_static,
            is_synchronized: false,
            params,
            return_type,
            generic_params: Vec::new(),
            body: MethodBody::Synthesized(lines),
            local_classes: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self.body, MethodBody::Native)
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        matches!(self.body, MethodBody::Abstract)
    }
}

/// Explicit `this(...)` / `super(...)` call opening a constructor body. The arguments
/// are already composed, parentheses included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorInvocation {
    None,
    Super(String),
    This(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub params: Vec<Param>,
    pub generic_params: Vec<String>,
    pub invocation: ConstructorInvocation,
    pub body: PendingBody,
    pub local_classes: Vec<ModuleId>,
    /// Added by the translator because the source declared no constructor.
    pub synthesized: bool,
    pub comments: Vec<String>,
}

impl Constructor {
    pub(crate) fn synthesized(params: Vec<Param>, invocation: ConstructorInvocation) -> Self {
        Self {
            params,
            generic_params: Vec::new(),
            invocation,
            body: PendingBody::empty(),
            local_classes: Vec::new(),
            synthesized: true,
            comments: Vec::new(),
        }
    }
}

/// Position of a static member among the module's static members, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticMember {
    Field(usize),
    Constant(usize),
    Block(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBlock {
    pub body: PendingBody,
    pub local_classes: Vec<ModuleId>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaModule {
    pub kind: ModuleKind,
    pub name: String,
    pub owner: Owner,
    pub generics: Vec<String>,
    pub superclass: Option<JavaType>,
    pub interfaces: Vec<JavaType>,
    pub fields: Vec<Field>,
    pub static_fields: Vec<Field>,
    pub constants: Vec<Constant>,
    pub constructors: Vec<Constructor>,
    pub methods: Vec<Method>,
    pub static_blocks: Vec<StaticBlock>,
    pub static_order: Vec<StaticMember>,
    pub nested: Vec<ModuleId>,
    /// Comments in front of the declaration.
    pub comments: Vec<String>,
    /// Comments inside the body not attached to any member.
    pub body_comments: Vec<String>,
}

impl JavaModule {
    pub fn new(kind: ModuleKind, name: impl Into<String>, owner: Owner) -> Self {
        Self {
            kind,
            name: name.into(),
            owner,
            generics: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            static_fields: Vec::new(),
            constants: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            static_blocks: Vec::new(),
            static_order: Vec::new(),
            nested: Vec::new(),
            comments: Vec::new(),
            body_comments: Vec::new(),
        }
    }

    /// Constant name the module is defined under.
    ///
    /// Classes declared in a method body are hoisted next to the method and get its
    /// name as a suffix; enum constant bodies get a `_Body` suffix so they do not clash
    /// with the constant itself.
    #[must_use]
    pub fn ruby_name(&self) -> String {
        let name = capitalize(&self.name);
        match (self.kind, &self.owner.method) {
            (ModuleKind::InnerClass, Some(method)) => format!("{name}_{}", method.name),
            (ModuleKind::InnerClass, None) => format!("{name}_Body"),
            _ => name,
        }
    }

    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_static_field(&mut self, field: Field) {
        self.static_order
            .push(StaticMember::Field(self.static_fields.len()));
        self.static_fields.push(field);
    }

    pub fn add_constant(&mut self, constant: Constant) {
        self.static_order
            .push(StaticMember::Constant(self.constants.len()));
        self.constants.push(constant);
    }

    pub fn add_static_block(&mut self, block: StaticBlock) {
        self.static_order
            .push(StaticMember::Block(self.static_blocks.len()));
        self.static_blocks.push(block);
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|constant| constant.name == name)
    }
}

/// One step of the generated constructor prologue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStep<'a> {
    /// Assign the field the zero value of its type.
    Default(&'a Field),
    /// Invoke the superclass constructor with the composed arguments.
    Super(&'a str),
    /// Assign the field its declared initializer.
    Initialize(&'a Field),
    /// Hand over to a sibling constructor; fields are its responsibility.
    Delegate(&'a str),
}

/// Field-initialization protocol run before the statements of a constructor.
///
/// With a superclass, every field first holds its default so the superclass
/// constructor never observes uninitialized storage; declared initializers run after
/// the super call, in declaration order. Without a superclass each field gets its
/// initializer or its default directly.
#[must_use]
pub fn initialization_plan<'a>(
    module: &'a JavaModule,
    invocation: &'a ConstructorInvocation,
) -> Vec<InitStep<'a>> {
    const NO_ARGUMENTS: &str = "()";

    if let ConstructorInvocation::This(arguments) = invocation {
        return vec![InitStep::Delegate(arguments)];
    }

    if module.superclass.is_none() {
        return module
            .fields
            .iter()
            .map(|field| {
                if field.initializer.is_some() {
                    InitStep::Initialize(field)
                } else {
                    InitStep::Default(field)
                }
            })
            .collect();
    }

    let arguments = match invocation {
        ConstructorInvocation::Super(arguments) => arguments.as_str(),
        _ => NO_ARGUMENTS,
    };
    let mut plan: Vec<InitStep<'a>> = module.fields.iter().map(InitStep::Default).collect();
    plan.push(InitStep::Super(arguments));
    plan.extend(
        module
            .fields
            .iter()
            .filter(|field| field.initializer.is_some())
            .map(InitStep::Initialize),
    );
    plan
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: String,
    pub is_static: bool,
    pub wildcard: bool,
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("import ")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        f.write_str(&self.path)?;
        if self.wildcard {
            f.write_str(".*")?;
        }
        Ok(())
    }
}

/// All modules of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleGraph {
    modules: Vec<JavaModule>,
    roots: Vec<ModuleId>,
    pub package: Vec<String>,
    pub imports: Vec<Import>,
    /// Comments outside any type declaration.
    pub comments: Vec<String>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `module` and links it to its owner, or to the roots when it has none.
    pub fn alloc(&mut self, module: JavaModule) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        match module.owner.module {
            Some(owner) => self.modules[owner.idx()].nested.push(id),
            None => self.roots.push(id),
        }
        self.modules.push(module);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    #[must_use]
    pub fn roots(&self) -> &[ModuleId] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &JavaModule)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(idx, module)| (ModuleId(idx as u32), module))
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.iter()
            .find(|(_, module)| module.name == name)
            .map(|(id, _)| id)
    }

    /// Constant path of a module relative to the package, e.g. `Outer::Color`.
    #[must_use]
    pub fn ruby_path(&self, id: ModuleId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let module = &self[id];
            path.push(module.ruby_name());
            current = module.owner.module;
        }
        path.reverse();
        path
    }

    /// The module as a type, for use as a superclass or constructor receiver.
    #[must_use]
    pub fn java_type(&self, id: ModuleId) -> JavaType {
        JavaType::Class(ClassType::new(Vec::new(), self.ruby_path(id)))
    }
}

impl std::ops::Index<ModuleId> for ModuleGraph {
    type Output = JavaModule;

    fn index(&self, index: ModuleId) -> &Self::Output {
        &self.modules[index.idx()]
    }
}

impl std::ops::IndexMut<ModuleId> for ModuleGraph {
    fn index_mut(&mut self, index: ModuleId) -> &mut Self::Output {
        &mut self.modules[index.idx()]
    }
}
