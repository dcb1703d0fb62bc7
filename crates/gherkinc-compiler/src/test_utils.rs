//! Shared fixtures: a miniature class table shaped like the raytracer
//! library the dialect is written against.

use gherkinc_core::prototype::{ClassPrototype, FieldPrototype, FunctionPrototype};

use crate::config::Config;
use crate::table::ClassTable;

pub fn method(name: &str, ret: &str, args: &[&str]) -> FunctionPrototype {
    FunctionPrototype {
        name: name.to_string(),
        is_static: false,
        return_type: ret.to_string(),
        argument_types: args.iter().map(|a| a.to_string()).collect(),
        namespace: None,
    }
}

pub fn static_method(name: &str, ret: &str, args: &[&str], namespace: &str) -> FunctionPrototype {
    FunctionPrototype {
        name: name.to_string(),
        is_static: true,
        return_type: ret.to_string(),
        argument_types: args.iter().map(|a| a.to_string()).collect(),
        namespace: Some(namespace.to_string()),
    }
}

pub fn ctor(class: &str, args: &[&str]) -> FunctionPrototype {
    FunctionPrototype {
        name: class.to_string(),
        is_static: true,
        return_type: class.to_string(),
        argument_types: args.iter().map(|a| a.to_string()).collect(),
        namespace: None,
    }
}

pub fn field(name: &str, ty: &str) -> FieldPrototype {
    FieldPrototype {
        name: name.to_string(),
        ty: ty.to_string(),
        is_static: false,
        namespace: None,
    }
}

pub fn class(name: &str, filename: &str) -> ClassPrototype {
    ClassPrototype::new(name, filename)
}

/// Tuples, matrices, shapes and a light: enough surface to exercise every
/// resolution path the parser has.
pub fn raytracer_classes() -> Vec<ClassPrototype> {
    let mut tuple = class("Tuple", "Tuple.h");
    tuple.constructors = vec![ctor("Tuple", &["double", "double", "double", "double"])];
    tuple.methods = vec![
        method("x", "double", &[]),
        method("y", "double", &[]),
        method("z", "double", &[]),
        method("w", "double", &[]),
        method("add", "Tuple", &["Tuple"]),
        method("subtract", "Tuple", &["Tuple"]),
        method("scale", "Tuple", &["double"]),
        method("divide", "Tuple", &["double"]),
        method("negate", "Tuple", &[]),
        method("magnitude", "double", &[]),
        method("normalize", "Tuple", &[]),
        method("dot", "double", &["Tuple"]),
        method("equals", "bool", &["Tuple"]),
    ];

    let mut point = class("Point", "Tuple.h");
    point.constructors = vec![ctor("Point", &["double", "double", "double"])];
    let mut vector = class("Vector", "Tuple.h");
    vector.constructors = vec![ctor("Vector", &["double", "double", "double"])];

    let mut matrix = class("Matrix", "Matrix.h");
    matrix.methods = vec![
        method("multiply", "Matrix", &["Matrix"]),
        method("multiply", "Tuple", &["Tuple"]),
        method("inverse", "Matrix", &[]),
        method("get", "double", &["double", "double"]),
        method("equals", "bool", &["Matrix"]),
    ];

    let mut transformation = class("Transformation", "Matrix.h");
    transformation.methods = vec![
        static_method(
            "translation",
            "Matrix",
            &["double", "double", "double"],
            "Transformation",
        ),
        static_method(
            "scaling",
            "Matrix",
            &["double", "double", "double"],
            "Transformation",
        ),
        static_method("identity", "Matrix", &[], "Transformation"),
    ];

    let mut shape = class("Shape", "shapes/Shape.h");
    shape.is_abstract = true;
    shape.fields = vec![field("transform", "Matrix"), field("material", "Material")];
    shape.methods = vec![
        method("equals", "bool", &["Shape"]),
        method("set_transform", "void", &["Matrix"]),
    ];

    let mut sphere = class("Sphere", "shapes/Sphere.h");
    sphere.extends = Some("Shape".to_string());

    let mut material = class("Material", "Material.h");
    material.constructors = vec![ctor("Material", &[])];
    material.fields = vec![field("color", "Colour"), field("ambient", "double")];
    material.methods = vec![method("equals", "bool", &["Material"])];

    let mut colour = class("Colour", "Colour.h");
    colour.constructors = vec![ctor("Colour", &["double", "double", "double"])];
    colour.fields = vec![
        field("red", "double"),
        field("green", "double"),
        field("blue", "double"),
    ];
    colour.methods = vec![
        method("add", "Colour", &["Colour"]),
        method("multiply", "Colour", &["Colour"]),
        method("equals", "bool", &["Colour"]),
    ];

    let mut world = class("World", "World.h");
    world.methods = vec![
        static_method("default_world", "World", &[], "World"),
        method("getShape", "Shape*", &["double"]),
    ];

    vec![
        tuple,
        point,
        vector,
        matrix,
        transformation,
        shape,
        sphere,
        material,
        colour,
        world,
    ]
}

pub fn raytracer_table() -> ClassTable {
    ClassTable::build(raytracer_classes(), &Config::default()).expect("fixture table builds")
}
