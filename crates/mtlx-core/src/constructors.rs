//! Convenience constructors for the built-in element kinds.

use crate::{Element, ElementKind};

impl Element {
    pub fn collection(name: &str) -> Self {
        ElementKind::Collection.instantiate().preset("name", name)
    }

    /// A collection member; `geom` is a comma-separated list of geometry paths.
    pub fn collection_add(name: &str, geom: &str) -> Self {
        ElementKind::CollectionAdd
            .instantiate()
            .preset("name", name)
            .preset("geom", geom)
    }

    pub fn geom_info(name: &str) -> Self {
        ElementKind::GeomInfo.instantiate().preset("name", name)
    }

    /// A geometry attribute whose `value` text is interpreted per `value_type`.
    pub fn geom_attr(name: &str, value_type: &str, value: &str) -> Self {
        ElementKind::GeomAttr
            .instantiate()
            .preset("name", name)
            .preset("type", value_type)
            .preset("value", value)
    }

    pub fn shader(name: &str, shader_type: &str, shader_program: &str) -> Self {
        ElementKind::Shader
            .instantiate()
            .preset("name", name)
            .preset("shadertype", shader_type)
            .preset("shaderprogram", shader_program)
    }

    /// An input connection to the output of another shader node.
    pub fn coshader(name: &str, shader: &str) -> Self {
        ElementKind::CoShader
            .instantiate()
            .preset("name", name)
            .preset("shader", shader)
    }

    pub fn parameter(name: &str, value_type: &str, value: &str) -> Self {
        ElementKind::Parameter
            .instantiate()
            .preset("name", name)
            .preset("type", value_type)
            .preset("value", value)
    }

    pub fn aov(name: &str, value_type: &str) -> Self {
        ElementKind::Aov
            .instantiate()
            .preset("name", name)
            .preset("type", value_type)
    }

    pub fn aov_set(name: &str) -> Self {
        ElementKind::AovSet.instantiate().preset("name", name)
    }

    pub fn material(name: &str) -> Self {
        ElementKind::Material.instantiate().preset("name", name)
    }

    pub fn shader_ref(name: &str) -> Self {
        ElementKind::ShaderRef.instantiate().preset("name", name)
    }

    pub fn material_assign(name: &str) -> Self {
        ElementKind::MaterialAssign.instantiate().preset("name", name)
    }

    pub fn look(name: &str) -> Self {
        ElementKind::Look.instantiate().preset("name", name)
    }
}
