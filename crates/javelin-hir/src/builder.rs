use javelin_flow::{Expression, Stmt};
use javelin_syntax::{kinds, Matcher, ParseNode};
use javelin_types::JavaType;
use tracing::debug;

use crate::context::DeclKind;
use crate::decl::{
    match_annotation, match_arguments, match_constant_declarator_rest, match_formal_parameters,
    match_modifiers, match_variable_declarators, Modifiers,
};
use crate::model::{
    Constant, Constructor, ConstructorInvocation, Field, Import, JavaModule, Method, MethodBody,
    ModuleGraph, ModuleId, ModuleKind, Owner, Param, PendingBody, StaticBlock,
};
use crate::signature::{
    match_dims, match_qualified_name, match_type, match_type_list, match_type_parameters,
    try_match_throws,
};
use crate::{BodyScope, BuildError, Context, PeerMatchers};

/// Builds the module graph of one `compilationUnit`.
///
/// Method and constructor bodies are matched into statement IR and stored as pending
/// bodies; nothing is rendered here.
pub fn build_compilation_unit(
    tree: &ParseNode,
    peer: &dyn PeerMatchers,
) -> Result<ModuleGraph, BuildError> {
    let mut graph = ModuleGraph::new();
    let mut m = Matcher::new(tree);
    Builder::new(&mut graph, peer).match_compilation_unit(&mut m)?;
    let leftover = m.finish()?;
    graph.comments.extend(leftover);
    debug!(modules = graph.len(), "built module graph");
    Ok(graph)
}

/// Method (or constructor) signature parts matched before its rest production.
struct MethodHeader {
    name: String,
    return_type: JavaType,
    generics: Vec<String>,
}

/// Name given to the pseudo-method of static initializer blocks.
const STATIC_INITIALIZER: &str = "static";

pub(crate) struct Builder<'a> {
    graph: &'a mut ModuleGraph,
    peer: &'a dyn PeerMatchers,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(graph: &'a mut ModuleGraph, peer: &'a dyn PeerMatchers) -> Self {
        Self { graph, peer }
    }

    /// `compilationUnit: packageDeclaration? importDeclaration* typeDeclaration*`
    fn match_compilation_unit(&mut self, m: &mut Matcher<'_>) -> Result<(), BuildError> {
        m.expect_with(&[kinds::COMPILATION_UNIT], |m| {
            let package = m.try_match_with(&[kinds::PACKAGE_DECLARATION], |m| {
                m.expect(&["package"])?;
                let name = match_qualified_name(m)?;
                m.expect(&[";"])?;
                Ok::<_, BuildError>(name)
            })?;
            if let Some(package) = package {
                self.graph.package = package.split('.').map(str::to_owned).collect();
            }
            self.graph.comments.extend(m.take_comments());

            m.loop_match(kinds::IMPORT_DECLARATION, |m| {
                m.expect(&["import"])?;
                let is_static = m.try_match(&["static"])?.is_some();
                let path = match_qualified_name(m)?;
                let wildcard = if m.try_match(&["."])?.is_some() {
                    m.expect(&["*"])?;
                    true
                } else {
                    false
                };
                m.expect(&[";"])?;
                self.graph.imports.push(Import {
                    path,
                    is_static,
                    wildcard,
                });
                Ok::<_, BuildError>(())
            })?;

            let cx = Context::top_level();
            m.loop_match(kinds::TYPE_DECLARATION, |m| {
                if m.try_match(&[";"])?.is_none() {
                    self.match_class_or_interface_declaration(m, &cx)?;
                }
                Ok::<_, BuildError>(())
            })?;
            Ok::<_, BuildError>(())
        })
    }

    /// `classOrInterfaceDeclaration: classOrInterfaceModifiers (classDeclaration | interfaceDeclaration)`
    pub(crate) fn match_class_or_interface_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<ModuleId, BuildError> {
        let peer = self.peer;
        m.expect_with(&[kinds::CLASS_OR_INTERFACE_DECLARATION], |m| {
            let comments = m.take_comments();
            let modifiers = match_modifiers(
                m,
                cx,
                peer,
                kinds::CLASS_OR_INTERFACE_MODIFIERS,
                kinds::CLASS_OR_INTERFACE_MODIFIER,
            )?;
            let id = self.match_class_or_interface(m, cx, &modifiers)?;
            self.graph[id].comments.splice(0..0, comments);
            Ok::<_, BuildError>(id)
        })
    }

    fn match_class_or_interface(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        modifiers: &Modifiers,
    ) -> Result<ModuleId, BuildError> {
        match m.peek_kind() {
            Some(kinds::CLASS_DECLARATION) => self.match_class_declaration(m, cx, modifiers),
            Some(kinds::INTERFACE_DECLARATION) => self.match_interface_declaration(m, cx),
            _ => Err(m
                .mismatch(&[kinds::CLASS_DECLARATION, kinds::INTERFACE_DECLARATION])
                .into()),
        }
    }

    /// `classDeclaration: normalClassDeclaration | enumDeclaration`
    fn match_class_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        modifiers: &Modifiers,
    ) -> Result<ModuleId, BuildError> {
        m.expect_with(&[kinds::CLASS_DECLARATION], |m| {
            if m.next_is(&[kinds::ENUM_DECLARATION]) {
                self.match_enum_declaration(m, cx)
            } else {
                self.match_normal_class_declaration(m, cx, modifiers)
            }
        })
    }

    /// `normalClassDeclaration: 'class' Identifier typeParameters? ('extends' type)?
    /// ('implements' typeList)? classBody`
    fn match_normal_class_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        modifiers: &Modifiers,
    ) -> Result<ModuleId, BuildError> {
        m.expect_with(&[kinds::NORMAL_CLASS_DECLARATION], |m| {
            m.expect(&["class"])?;
            let name = m.match_name()?;
            let kind = cx.infer_kind(DeclKind::Class, modifiers.is_static());
            let generics = if m.next_is(&[kinds::TYPE_PARAMETERS]) {
                match_type_parameters(m, cx)?
            } else {
                Vec::new()
            };

            let id = self.alloc_module(kind, &name, cx);
            let inner = cx.enter_module(id, &generics);
            self.graph[id].generics = generics;
            if m.try_match(&["extends"])?.is_some() {
                self.graph[id].superclass = Some(match_type(m, &inner)?);
            }
            if m.try_match(&["implements"])?.is_some() {
                self.graph[id].interfaces = match_type_list(m, &inner)?;
            }

            self.match_class_body(m, &inner, id)?;
            self.finish_class(id);
            Ok::<_, BuildError>(id)
        })
    }

    fn alloc_module(&mut self, kind: ModuleKind, name: &str, cx: &Context) -> ModuleId {
        let id = self.graph.alloc(JavaModule::new(kind, name, cx.owner()));
        debug!(name, ?kind, ?id, "matched type declaration");
        id
    }

    /// Adds a no-argument constructor to classes that declare fields but no
    /// constructor, so field defaults and initializers still run.
    fn finish_class(&mut self, id: ModuleId) {
        let module = &mut self.graph[id];
        if module.is_interface() || !module.constructors.is_empty() || module.fields.is_empty() {
            return;
        }
        debug!(name = %module.name, "synthesized default constructor");
        module
            .constructors
            .push(Constructor::synthesized(Vec::new(), ConstructorInvocation::None));
    }

    /// `classBody: '{' classBodyDeclaration* '}'`
    fn match_class_body(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
    ) -> Result<(), BuildError> {
        m.expect_with(&[kinds::CLASS_BODY], |m| {
            m.expect(&["{"])?;
            self.graph[id].body_comments.extend(m.take_comments());
            m.loop_match(kinds::CLASS_BODY_DECLARATION, |m| {
                self.match_class_body_declaration(m, cx, id)
            })?;
            m.expect(&["}"])?;
            self.graph[id].body_comments.extend(m.take_comments());
            Ok::<_, BuildError>(())
        })
    }

    /// Body of a `classBodyDeclaration`: `';' | 'static'? block | modifiers memberDecl`
    fn match_class_body_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
    ) -> Result<(), BuildError> {
        let comments = m.take_comments();
        if m.try_match(&[";"])?.is_some() {
            self.graph[id].body_comments.extend(comments);
            return Ok(());
        }

        if m.next_is(&["static", kinds::BLOCK]) {
            if m.try_match(&["static"])?.is_none() {
                return Err(BuildError::unsupported("instance initializer block"));
            }
            let block_cx = cx.enter_method(STATIC_INITIALIZER, true, &[]);
            let (stmts, local_classes) = self.match_block(m, &block_cx)?;
            self.graph[id].add_static_block(StaticBlock {
                body: PendingBody::new(stmts),
                local_classes,
                comments,
            });
            return Ok(());
        }

        let modifiers = match_modifiers(m, cx, self.peer, kinds::MODIFIERS, kinds::MODIFIER)?;
        self.match_member_decl(m, cx, id, &modifiers, comments)
    }

    /// `memberDecl: genericMethodOrConstructorDecl | memberDeclaration
    ///     | 'void' Identifier voidMethodDeclaratorRest | Identifier constructorDeclaratorRest
    ///     | interfaceDeclaration | classDeclaration`
    fn match_member_decl(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
        modifiers: &Modifiers,
        comments: Vec<String>,
    ) -> Result<(), BuildError> {
        m.expect_with(&[kinds::MEMBER_DECL], |m| {
            match m.peek_kind() {
                Some(kinds::GENERIC_METHOD_OR_CONSTRUCTOR_DECL) => {
                    m.expect_with(&[kinds::GENERIC_METHOD_OR_CONSTRUCTOR_DECL], |m| {
                        let generics = match_type_parameters(m, cx)?;
                        m.expect_with(&[kinds::GENERIC_METHOD_OR_CONSTRUCTOR_REST], |m| {
                            if m.next_is_name() {
                                m.match_name()?;
                                return self.match_constructor_rest(m, cx, id, generics, comments);
                            }
                            let return_type = self.match_return_type(m, cx, &generics)?;
                            let header = MethodHeader {
                                name: m.match_name()?,
                                return_type,
                                generics,
                            };
                            self.match_method_rest(
                                m,
                                cx,
                                id,
                                kinds::METHOD_DECLARATOR_REST,
                                header,
                                modifiers,
                                comments,
                            )
                        })
                    })
                }
                Some(kinds::MEMBER_DECLARATION) => {
                    m.expect_with(&[kinds::MEMBER_DECLARATION], |m| {
                        let ty = match_type(m, cx)?;
                        if m.next_is(&[kinds::FIELD_DECLARATION]) {
                            return self.match_field_declaration(m, cx, id, ty, modifiers, comments);
                        }
                        m.expect_with(&[kinds::METHOD_DECLARATION], |m| {
                            let header = MethodHeader {
                                name: m.match_name()?,
                                return_type: ty,
                                generics: Vec::new(),
                            };
                            self.match_method_rest(
                                m,
                                cx,
                                id,
                                kinds::METHOD_DECLARATOR_REST,
                                header,
                                modifiers,
                                comments,
                            )
                        })
                    })
                }
                Some("void") => {
                    m.expect(&["void"])?;
                    let header = MethodHeader {
                        name: m.match_name()?,
                        return_type: JavaType::Void,
                        generics: Vec::new(),
                    };
                    self.match_method_rest(
                        m,
                        cx,
                        id,
                        kinds::VOID_METHOD_DECLARATOR_REST,
                        header,
                        modifiers,
                        comments,
                    )
                }
                Some(kinds::IDENTIFIER) => {
                    m.match_name()?;
                    self.match_constructor_rest(m, cx, id, Vec::new(), comments)
                }
                Some(kinds::INTERFACE_DECLARATION) => {
                    let nested = self.match_interface_declaration(m, cx)?;
                    self.graph[nested].comments.splice(0..0, comments);
                    Ok(())
                }
                Some(kinds::CLASS_DECLARATION) => {
                    let nested = self.match_class_declaration(m, cx, modifiers)?;
                    self.graph[nested].comments.splice(0..0, comments);
                    Ok(())
                }
                _ => Err(m
                    .mismatch(&[
                        kinds::GENERIC_METHOD_OR_CONSTRUCTOR_DECL,
                        kinds::MEMBER_DECLARATION,
                        "void",
                        kinds::IDENTIFIER,
                        kinds::INTERFACE_DECLARATION,
                        kinds::CLASS_DECLARATION,
                    ])
                    .into()),
            }
        })
    }

    /// `type | 'void'` in front of a generic method name; type variables of the method
    /// are already in scope.
    fn match_return_type(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        generics: &[String],
    ) -> Result<JavaType, BuildError> {
        if m.try_match(&["void"])?.is_some() {
            return Ok(JavaType::Void);
        }
        let scope = cx.enter_method("", false, generics);
        Ok(match_type(m, &scope)?)
    }

    /// `fieldDeclaration: variableDeclarators ';'`
    ///
    /// `static final` fields become constants, other static fields class variables.
    fn match_field_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
        ty: JavaType,
        modifiers: &Modifiers,
        mut comments: Vec<String>,
    ) -> Result<(), BuildError> {
        let peer = self.peer;
        m.expect_with(&[kinds::FIELD_DECLARATION], |m| {
            let declarators = match_variable_declarators(m, cx, peer, &ty)?;
            m.expect(&[";"])?;
            let module = &mut self.graph[id];
            for declarator in declarators {
                let comments = std::mem::take(&mut comments);
                debug!(module = %module.name, field = %declarator.name, "matched field");
                if modifiers.is_static() && modifiers.is_final() {
                    let value = declarator
                        .initializer
                        .unwrap_or_else(|| Expression::new(declarator.ty.default_value()));
                    module.add_constant(Constant {
                        name: declarator.name,
                        ty: Some(declarator.ty),
                        value,
                        comments,
                    });
                    continue;
                }
                let field = Field {
                    name: declarator.name,
                    ty: declarator.ty,
                    initializer: declarator.initializer,
                    comments,
                };
                if modifiers.is_static() {
                    module.add_static_field(field);
                } else {
                    module.add_field(field);
                }
            }
            Ok::<_, BuildError>(())
        })
    }

    /// `methodDeclaratorRest` / `voidMethodDeclaratorRest`:
    /// `formalParameters ('[' ']')* ('throws' qualifiedNameList)? (methodBody | ';')`
    ///
    /// A method without body is native when declared `native` and abstract otherwise,
    /// whatever its return type.
    #[allow(clippy::too_many_arguments)]
    fn match_method_rest(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
        rest_kind: &str,
        header: MethodHeader,
        modifiers: &Modifiers,
        comments: Vec<String>,
    ) -> Result<(), BuildError> {
        let peer = self.peer;
        m.expect_with(&[rest_kind], |m| {
            let method_cx = cx.enter_method(&header.name, modifiers.is_static(), &header.generics);
            let params = match_formal_parameters(m, &method_cx, peer)?;
            let return_type = match_dims(m, header.return_type)?;
            try_match_throws(m)?;

            let (body, local_classes) = if m.try_match(&[";"])?.is_some() {
                let body = if modifiers.is_native() {
                    MethodBody::Native
                } else {
                    MethodBody::Abstract
                };
                (body, Vec::new())
            } else {
                let (stmts, local_classes) = m.expect_with(&[kinds::METHOD_BODY], |m| {
                    self.match_block(m, &method_cx)
                })?;
                (MethodBody::Pending(PendingBody::new(stmts)), local_classes)
            };

            let module = &mut self.graph[id];
            debug!(module = %module.name, method = %header.name, "matched method");
            module.methods.push(Method {
                name: header.name,
                is_static: modifiers.is_static(),
                is_synchronized: modifiers.is_synchronized(),
                params,
                return_type,
                generic_params: header.generics,
                body,
                local_classes,
                comments,
            });
            Ok::<_, BuildError>(())
        })
    }

    /// `constructorDeclaratorRest: formalParameters ('throws' qualifiedNameList)? constructorBody`
    /// with `constructorBody: '{' explicitConstructorInvocation? blockStatement* '}'`
    fn match_constructor_rest(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
        generics: Vec<String>,
        comments: Vec<String>,
    ) -> Result<(), BuildError> {
        let peer = self.peer;
        m.expect_with(&[kinds::CONSTRUCTOR_DECLARATOR_REST], |m| {
            let ctor_cx = cx.enter_method("initialize", false, &generics);
            let params = match_formal_parameters(m, &ctor_cx, peer)?;
            try_match_throws(m)?;

            let (invocation, stmts, local_classes) =
                m.expect_with(&[kinds::CONSTRUCTOR_BODY], |m| {
                    m.expect(&["{"])?;
                    let invocation = m
                        .try_match_with(&[kinds::EXPLICIT_CONSTRUCTOR_INVOCATION], |m| {
                            let keyword = m.expect(&["this", "super"])?;
                            let arguments = match_arguments(m, &ctor_cx, peer)?;
                            m.expect(&[";"])?;
                            let arguments = peer.compose_arguments(&arguments, true);
                            Ok::<_, BuildError>(if keyword == "this" {
                                ConstructorInvocation::This(arguments)
                            } else {
                                ConstructorInvocation::Super(arguments)
                            })
                        })?
                        .unwrap_or(ConstructorInvocation::None);
                    let (stmts, local_classes) = self.match_block_rest(m, &ctor_cx)?;
                    Ok::<_, BuildError>((invocation, stmts, local_classes))
                })?;

            let module = &mut self.graph[id];
            debug!(module = %module.name, params = params.len(), "matched constructor");
            module.constructors.push(Constructor {
                params,
                generic_params: generics,
                invocation,
                body: PendingBody::new(stmts),
                local_classes,
                synthesized: false,
                comments,
            });
            Ok::<_, BuildError>(())
        })
    }

    /// `block: '{' blockStatement* '}'`
    fn match_block(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<(Vec<Stmt>, Vec<ModuleId>), BuildError> {
        m.expect_with(&[kinds::BLOCK], |m| {
            m.expect(&["{"])?;
            self.match_block_rest(m, cx)
        })
    }

    /// Statements up to and including the closing `}`; comments in front of the brace
    /// end up at the end of the body.
    fn match_block_rest(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<(Vec<Stmt>, Vec<ModuleId>), BuildError> {
        let mut scope = BodyScope::new(m, self.graph, self.peer, cx.clone());
        let mut stmts = scope.match_block_statements()?;
        let local_classes = scope.finish();
        m.expect(&["}"])?;
        stmts.extend(m.take_comments().into_iter().map(Stmt::Comment));
        Ok((stmts, local_classes))
    }

    /// `enumDeclaration: 'enum' Identifier ('implements' typeList)? enumBody`
    /// with `enumBody: '{' enumConstants? ','? enumBodyDeclarations? '}'`
    ///
    /// Every enum gets `set_value_name`, `to_s` and a static `values`, whatever it
    /// declares itself.
    fn match_enum_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<ModuleId, BuildError> {
        m.expect_with(&[kinds::ENUM_DECLARATION], |m| {
            m.expect(&["enum"])?;
            let name = m.match_name()?;
            let kind = cx.infer_kind(DeclKind::Enum, false);
            let id = self.alloc_module(kind, &name, cx);
            let inner = cx.enter_module(id, &[]);
            if m.try_match(&["implements"])?.is_some() {
                self.graph[id].interfaces = match_type_list(m, &inner)?;
            }

            let mut constant_names = Vec::new();
            m.expect_with(&[kinds::ENUM_BODY], |m| {
                m.expect(&["{"])?;
                self.graph[id].body_comments.extend(m.take_comments());
                m.try_match_with(&[kinds::ENUM_CONSTANTS], |m| {
                    loop {
                        let constant = self.match_enum_constant(m, cx, &inner, id)?;
                        constant_names.push(constant);
                        if m.try_match(&[","])?.is_none() {
                            break;
                        }
                    }
                    Ok::<_, BuildError>(())
                })?;
                m.try_match(&[","])?;
                m.try_match_with(&[kinds::ENUM_BODY_DECLARATIONS], |m| {
                    m.expect(&[";"])?;
                    m.loop_match(kinds::CLASS_BODY_DECLARATION, |m| {
                        self.match_class_body_declaration(m, &inner, id)
                    })?;
                    Ok::<_, BuildError>(())
                })?;
                m.expect(&["}"])?;
                self.graph[id].body_comments.extend(m.take_comments());
                Ok::<_, BuildError>(())
            })?;

            self.synthesize_enum_members(id, &constant_names);
            self.finish_class(id);
            Ok::<_, BuildError>(id)
        })
    }

    /// `enumConstant: annotation* Identifier arguments? classBody?`
    ///
    /// Binds `NAME = Enum.new(args).set_value_name("NAME")`; a constant with a body
    /// instantiates its own subclass instead. Constants of an enum nested in another
    /// type are re-exported there. Returns the constant's target name.
    fn match_enum_constant(
        &mut self,
        m: &mut Matcher<'_>,
        outer_cx: &Context,
        enum_cx: &Context,
        enum_id: ModuleId,
    ) -> Result<String, BuildError> {
        let peer = self.peer;
        m.expect_with(&[kinds::ENUM_CONSTANT], |m| {
            let comments = m.take_comments();
            while m.next_is(&[kinds::ANNOTATION]) {
                match_annotation(m, enum_cx, peer)?;
            }
            let name = m.match_name()?;
            let arguments = if m.next_is(&[kinds::ARGUMENTS]) {
                match_arguments(m, enum_cx, peer)?
            } else {
                Vec::new()
            };

            let receiver = if m.next_is(&[kinds::CLASS_BODY]) {
                let body_id = self.match_enum_constant_body(m, enum_cx, enum_id, &name)?;
                self.graph[body_id].ruby_name()
            } else {
                self.graph[enum_id].ruby_name()
            };

            let value = Expression::new(format!(
                "{receiver}.new{}.set_value_name(\"{name}\")",
                peer.compose_arguments(&arguments, false)
            ));
            let constant = Constant {
                name,
                ty: None,
                value,
                comments,
            };
            let ruby_name = constant.ruby_name();

            if let Some(outer) = outer_cx.module() {
                let path = self.graph.ruby_path(enum_id).join("::");
                self.graph[outer].add_constant(Constant {
                    name: constant.name.clone(),
                    ty: None,
                    value: Expression::new(format!("{path}::{ruby_name}")),
                    comments: Vec::new(),
                });
            }
            self.graph[enum_id].add_constant(constant);
            Ok::<_, BuildError>(ruby_name)
        })
    }

    /// Subclass of the enum holding the members of one constant's body. Its constructor
    /// forwards every argument to the enum's.
    fn match_enum_constant_body(
        &mut self,
        m: &mut Matcher<'_>,
        enum_cx: &Context,
        enum_id: ModuleId,
        constant: &str,
    ) -> Result<ModuleId, BuildError> {
        let mut module = JavaModule::new(
            ModuleKind::InnerClass,
            constant,
            Owner {
                module: Some(enum_id),
                method: None,
            },
        );
        module.superclass = Some(self.graph.java_type(enum_id));
        let forwarded = Param {
            name: "args".to_owned(),
            ty: JavaType::array_of(JavaType::object()),
            variadic: true,
        };
        let arguments = self
            .peer
            .compose_arguments(&[Expression::new("*args")], true);
        module.constructors.push(Constructor::synthesized(
            vec![forwarded],
            ConstructorInvocation::Super(arguments),
        ));

        let id = self.graph.alloc(module);
        debug!(constant, ?id, "matched enum constant body");
        self.match_class_body(m, &enum_cx.enter_module(id, &[]), id)?;
        Ok(id)
    }

    fn synthesize_enum_members(&mut self, id: ModuleId, constant_names: &[String]) {
        let module = &mut self.graph[id];
        module.methods.push(Method::synthesized(
            "set_value_name",
            false,
            vec![Param {
                name: "name".to_owned(),
                ty: JavaType::string(),
                variadic: false,
            }],
            JavaType::Void,
            vec!["@value_name = name".to_owned(), "self".to_owned()],
        ));
        module.methods.push(Method::synthesized(
            "to_s",
            false,
            Vec::new(),
            JavaType::string(),
            vec!["@value_name".to_owned()],
        ));
        module.methods.push(Method::synthesized(
            "values",
            true,
            Vec::new(),
            JavaType::array_of(JavaType::object()),
            vec![format!("[{}]", constant_names.join(", "))],
        ));
    }

    /// `interfaceDeclaration: normalInterfaceDeclaration | annotationTypeDeclaration`
    fn match_interface_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<ModuleId, BuildError> {
        m.expect_with(&[kinds::INTERFACE_DECLARATION], |m| {
            if m.next_is(&[kinds::ANNOTATION_TYPE_DECLARATION]) {
                self.match_annotation_type_declaration(m, cx)
            } else {
                self.match_normal_interface_declaration(m, cx)
            }
        })
    }

    /// `normalInterfaceDeclaration: 'interface' Identifier typeParameters?
    /// ('extends' typeList)? interfaceBody`
    fn match_normal_interface_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<ModuleId, BuildError> {
        m.expect_with(&[kinds::NORMAL_INTERFACE_DECLARATION], |m| {
            m.expect(&["interface"])?;
            let name = m.match_name()?;
            let kind = cx.infer_kind(DeclKind::Interface, false);
            let generics = if m.next_is(&[kinds::TYPE_PARAMETERS]) {
                match_type_parameters(m, cx)?
            } else {
                Vec::new()
            };

            let id = self.alloc_module(kind, &name, cx);
            let inner = cx.enter_module(id, &generics);
            self.graph[id].generics = generics;
            if m.try_match(&["extends"])?.is_some() {
                self.graph[id].interfaces = match_type_list(m, &inner)?;
            }

            m.expect_with(&[kinds::INTERFACE_BODY], |m| {
                m.expect(&["{"])?;
                self.graph[id].body_comments.extend(m.take_comments());
                m.loop_match(kinds::INTERFACE_BODY_DECLARATION, |m| {
                    self.match_interface_body_declaration(m, &inner, id)
                })?;
                m.expect(&["}"])?;
                self.graph[id].body_comments.extend(m.take_comments());
                Ok::<_, BuildError>(())
            })?;
            Ok::<_, BuildError>(id)
        })
    }

    /// `interfaceBodyDeclaration: modifiers interfaceMemberDecl | ';'`
    fn match_interface_body_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
    ) -> Result<(), BuildError> {
        let comments = m.take_comments();
        if m.try_match(&[";"])?.is_some() {
            self.graph[id].body_comments.extend(comments);
            return Ok(());
        }
        let modifiers = match_modifiers(m, cx, self.peer, kinds::MODIFIERS, kinds::MODIFIER)?;
        m.expect_with(&[kinds::INTERFACE_MEMBER_DECL], |m| {
            match m.peek_kind() {
                Some(kinds::INTERFACE_METHOD_OR_FIELD_DECL) => {
                    self.match_interface_method_or_field(m, cx, id, comments)
                }
                Some(kinds::INTERFACE_GENERIC_METHOD_DECL) => {
                    m.expect_with(&[kinds::INTERFACE_GENERIC_METHOD_DECL], |m| {
                        let generics = match_type_parameters(m, cx)?;
                        let return_type = self.match_return_type(m, cx, &generics)?;
                        let header = MethodHeader {
                            name: m.match_name()?,
                            return_type,
                            generics,
                        };
                        self.match_interface_method_rest(
                            m,
                            cx,
                            id,
                            kinds::INTERFACE_METHOD_DECLARATOR_REST,
                            header,
                            comments,
                        )
                    })
                }
                Some("void") => {
                    m.expect(&["void"])?;
                    let header = MethodHeader {
                        name: m.match_name()?,
                        return_type: JavaType::Void,
                        generics: Vec::new(),
                    };
                    self.match_interface_method_rest(
                        m,
                        cx,
                        id,
                        kinds::VOID_INTERFACE_METHOD_DECLARATOR_REST,
                        header,
                        comments,
                    )
                }
                Some(kinds::INTERFACE_DECLARATION) => {
                    let nested = self.match_interface_declaration(m, cx)?;
                    self.graph[nested].comments.splice(0..0, comments);
                    Ok(())
                }
                Some(kinds::CLASS_DECLARATION) => {
                    let nested = self.match_class_declaration(m, cx, &modifiers)?;
                    self.graph[nested].comments.splice(0..0, comments);
                    Ok(())
                }
                _ => Err(m
                    .mismatch(&[
                        kinds::INTERFACE_METHOD_OR_FIELD_DECL,
                        kinds::INTERFACE_GENERIC_METHOD_DECL,
                        "void",
                        kinds::INTERFACE_DECLARATION,
                        kinds::CLASS_DECLARATION,
                    ])
                    .into()),
            }
        })
    }

    /// `interfaceMethodOrFieldDecl: type Identifier interfaceMethodOrFieldRest`; the rest
    /// production tells a method (`interfaceMethodDeclaratorRest`) from constants
    /// (`constantDeclaratorsRest ';'`).
    fn match_interface_method_or_field(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
        comments: Vec<String>,
    ) -> Result<(), BuildError> {
        let peer = self.peer;
        m.expect_with(&[kinds::INTERFACE_METHOD_OR_FIELD_DECL], |m| {
            let ty = match_type(m, cx)?;
            let name = m.match_name()?;
            m.expect_with(&[kinds::INTERFACE_METHOD_OR_FIELD_REST], |m| {
                if m.next_is(&[kinds::INTERFACE_METHOD_DECLARATOR_REST]) {
                    let header = MethodHeader {
                        name,
                        return_type: ty,
                        generics: Vec::new(),
                    };
                    return self.match_interface_method_rest(
                        m,
                        cx,
                        id,
                        kinds::INTERFACE_METHOD_DECLARATOR_REST,
                        header,
                        comments,
                    );
                }

                // constantDeclaratorsRest: constantDeclaratorRest (',' constantDeclarator)*
                m.expect_with(&[kinds::CONSTANT_DECLARATORS_REST], |m| {
                    let (first_ty, value) = match_constant_declarator_rest(m, cx, peer, ty.clone())?;
                    let mut constants = vec![Constant {
                        name,
                        ty: Some(first_ty),
                        value,
                        comments,
                    }];
                    while m.try_match(&[","])?.is_some() {
                        let constant = m.expect_with(&[kinds::CONSTANT_DECLARATOR], |m| {
                            let name = m.match_name()?;
                            let (ty, value) =
                                match_constant_declarator_rest(m, cx, peer, ty.clone())?;
                            Ok::<_, BuildError>(Constant {
                                name,
                                ty: Some(ty),
                                value,
                                comments: Vec::new(),
                            })
                        })?;
                        constants.push(constant);
                    }
                    for constant in constants {
                        self.graph[id].add_constant(constant);
                    }
                    Ok::<_, BuildError>(())
                })?;
                m.expect(&[";"])?;
                Ok::<_, BuildError>(())
            })
        })
    }

    /// `interfaceMethodDeclaratorRest` / `voidInterfaceMethodDeclaratorRest`:
    /// `formalParameters ('[' ']')* ('throws' qualifiedNameList)? ';'`
    fn match_interface_method_rest(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
        id: ModuleId,
        rest_kind: &str,
        header: MethodHeader,
        comments: Vec<String>,
    ) -> Result<(), BuildError> {
        let peer = self.peer;
        m.expect_with(&[rest_kind], |m| {
            let method_cx = cx.enter_method(&header.name, false, &header.generics);
            let params = match_formal_parameters(m, &method_cx, peer)?;
            let return_type = match_dims(m, header.return_type)?;
            try_match_throws(m)?;
            m.expect(&[";"])?;

            let module = &mut self.graph[id];
            debug!(module = %module.name, method = %header.name, "matched abstract method");
            module.methods.push(Method {
                name: header.name,
                is_static: false,
                is_synchronized: false,
                params,
                return_type,
                generic_params: header.generics,
                body: MethodBody::Abstract,
                local_classes: Vec::new(),
                comments,
            });
            Ok::<_, BuildError>(())
        })
    }

    /// `annotationTypeDeclaration: '@' 'interface' Identifier annotationTypeBody`
    ///
    /// Annotation types have no runtime meaning in the target; they become empty
    /// interfaces and their elements are dropped.
    fn match_annotation_type_declaration(
        &mut self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<ModuleId, BuildError> {
        let peer = self.peer;
        m.expect_with(&[kinds::ANNOTATION_TYPE_DECLARATION], |m| {
            m.expect(&["@"])?;
            m.expect(&["interface"])?;
            let name = m.match_name()?;
            let kind = cx.infer_kind(DeclKind::Interface, false);
            let id = self.alloc_module(kind, &name, cx);
            let inner = cx.enter_module(id, &[]);

            m.expect_with(&[kinds::ANNOTATION_TYPE_BODY], |m| {
                m.expect(&["{"])?;
                m.loop_match(kinds::ANNOTATION_TYPE_ELEMENT_DECLARATION, |m| {
                    match_modifiers(m, &inner, peer, kinds::MODIFIERS, kinds::MODIFIER)?;
                    m.expect_with(&[kinds::ANNOTATION_TYPE_ELEMENT_REST], |m| {
                        match_type(m, &inner)?;
                        m.expect_with(&[kinds::ANNOTATION_METHOD_OR_CONSTANT_REST], |m| {
                            m.expect_with(&[kinds::ANNOTATION_METHOD_REST], |m| {
                                m.match_name()?;
                                m.expect(&["("])?;
                                m.expect(&[")"])?;
                                Ok::<_, BuildError>(())
                            })
                        })?;
                        m.expect(&[";"])?;
                        Ok::<_, BuildError>(())
                    })
                })?;
                m.expect(&["}"])?;
                Ok::<_, BuildError>(())
            })?;
            self.graph[id].body_comments.extend(m.take_comments());
            Ok::<_, BuildError>(id)
        })
    }
}
