use crate::model::{MethodOwner, ModuleId, ModuleKind, Owner};

/// What the declaration matchers know about the code surrounding the current node.
///
/// Contexts are immutable values: entering a module or a method creates a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    module: Option<ModuleId>,
    method: Option<MethodOwner>,
    /// Type variables in scope; they erase to `Object`.
    type_params: Vec<String>,
    /// Classes declared earlier in the enclosing body, by Java name.
    local_types: Vec<(String, Vec<String>)>,
}

/// Declaration shape, before the surrounding context is taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
}

impl Context {
    pub fn top_level() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn module(&self) -> Option<ModuleId> {
        self.module
    }

    #[must_use]
    pub fn method(&self) -> Option<&MethodOwner> {
        self.method.as_ref()
    }

    /// Owner record for a module declared in this context.
    #[must_use]
    pub fn owner(&self) -> Owner {
        Owner {
            module: self.module,
            method: self.method.clone(),
        }
    }

    /// Context for the body of `module`. Type variables stay visible; the enclosing
    /// method and its local classes do not.
    #[must_use]
    pub fn enter_module(&self, module: ModuleId, generics: &[String]) -> Self {
        let mut type_params = self.type_params.clone();
        type_params.extend(generics.iter().cloned());
        Self {
            module: Some(module),
            method: None,
            type_params,
            local_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn enter_method(&self, name: &str, is_static: bool, generics: &[String]) -> Self {
        let mut type_params = self.type_params.clone();
        type_params.extend(generics.iter().cloned());
        Self {
            module: self.module,
            method: Some(MethodOwner {
                name: name.to_owned(),
                is_static,
            }),
            type_params,
            local_types: self.local_types.clone(),
        }
    }

    /// Makes a class declared in the current body resolvable by its Java name.
    pub(crate) fn declare_local_type(&mut self, java_name: &str, ruby_path: Vec<String>) {
        self.local_types.push((java_name.to_owned(), ruby_path));
    }

    #[must_use]
    pub fn is_type_param(&self, name: &str) -> bool {
        self.type_params.iter().any(|param| param == name)
    }

    /// Module path of a class declared earlier in the current body.
    #[must_use]
    pub fn local_type(&self, name: &str) -> Option<&[String]> {
        self.local_types
            .iter()
            .rev()
            .find(|(java_name, _)| java_name == name)
            .map(|(_, path)| path.as_slice())
    }

    /// Classifies a declaration met in this context.
    ///
    /// Classes inside a method body are inner classes; types nested in another type are
    /// local (`static` splits classes further); everything else is top level.
    #[must_use]
    pub fn infer_kind(&self, decl: DeclKind, is_static: bool) -> ModuleKind {
        match decl {
            DeclKind::Enum => ModuleKind::Enum,
            DeclKind::Class if self.method.is_some() => ModuleKind::InnerClass,
            DeclKind::Class if self.module.is_some() => {
                if is_static {
                    ModuleKind::StaticLocalClass
                } else {
                    ModuleKind::LocalClass
                }
            }
            DeclKind::Class => ModuleKind::Class,
            DeclKind::Interface if self.module.is_some() => ModuleKind::LocalInterface,
            DeclKind::Interface => ModuleKind::Interface,
        }
    }
}
