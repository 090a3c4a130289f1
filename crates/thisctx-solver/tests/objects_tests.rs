use thisctx_solver::{
    DeclarationError, MemberDecl, ParamInfo, TypeDatabase, TypeFormatter, TypeId, TypeInterner,
    TypeKey, contextual_type_for, declare_method_type, declare_object_type, object_shape_of,
    strip_nullish,
};

fn point_members(db: &dyn TypeDatabase) -> Vec<MemberDecl> {
    let move_by = declare_method_type(
        db,
        vec![
            ParamInfo::required(db.intern_string("dx"), TypeId::NUMBER),
            ParamInfo::required(db.intern_string("dy"), TypeId::NUMBER),
            ParamInfo::optional(db.intern_string("dz"), TypeId::NUMBER),
        ],
        TypeId::VOID,
    );
    vec![
        MemberDecl::property(db.intern_string("x"), TypeId::NUMBER),
        MemberDecl::property(db.intern_string("y"), TypeId::NUMBER),
        MemberDecl::property(db.intern_string("z"), TypeId::NUMBER).with_optional(true),
        MemberDecl::method(db.intern_string("moveBy"), move_by),
    ]
}

#[test]
fn declares_point_in_member_order() {
    let interner = TypeInterner::new();
    let db: &dyn TypeDatabase = &interner;

    let point = declare_object_type(db, point_members(db)).expect("Point declares");
    let shape = object_shape_of(db, point).expect("object shape");

    let names: Vec<String> = shape
        .properties
        .iter()
        .map(|p| db.resolve_atom(p.name))
        .collect();
    assert_eq!(names, ["x", "y", "z", "moveBy"]);
    assert!(shape.properties[2].optional);
    assert!(shape.properties[3].is_method);
    assert_eq!(
        TypeFormatter::new(db).format(point),
        "{ x: number; y: number; z?: number; moveBy(dx: number, dy: number, dz?: number): void }"
    );
}

#[test]
fn declaration_is_structural() {
    let interner = TypeInterner::new();
    let db: &dyn TypeDatabase = &interner;

    let first = declare_object_type(db, point_members(db)).expect("first");
    let second = declare_object_type(db, point_members(db)).expect("second");
    assert_eq!(first, second);
}

#[test]
fn duplicate_member_is_rejected() {
    let interner = TypeInterner::new();
    let db: &dyn TypeDatabase = &interner;
    let x = db.intern_string("x");

    let err = declare_object_type(
        db,
        vec![
            MemberDecl::property(x, TypeId::NUMBER),
            MemberDecl::property(db.intern_string("y"), TypeId::NUMBER),
            MemberDecl::property(x, TypeId::STRING),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err,
        DeclarationError::DuplicateMember {
            name: "x".to_string(),
            index: 2
        }
    );
    assert_eq!(
        err.to_string(),
        "duplicate member 'x' in object type declaration"
    );
}

#[test]
fn declared_method_is_flagged_as_method() {
    let interner = TypeInterner::new();
    let db: &dyn TypeDatabase = &interner;

    let method = declare_method_type(db, Vec::new(), TypeId::VOID);
    let Some(TypeKey::Function(shape_id)) = db.lookup(method) else {
        panic!("expected function type");
    };
    let shape = db.function_shape(shape_id);
    assert!(shape.is_method);
}

#[test]
fn nullable_annotation_contextualizes_like_plain() {
    let interner = TypeInterner::new();
    let db: &dyn TypeDatabase = &interner;
    let point = declare_object_type(db, point_members(db)).expect("Point declares");

    let with_null = db.union2(point, TypeId::NULL);
    let with_both = db.union(vec![point, TypeId::NULL, TypeId::UNDEFINED]);

    assert_eq!(
        contextual_type_for(db, Some(point)),
        contextual_type_for(db, Some(with_null))
    );
    assert_eq!(
        contextual_type_for(db, Some(point)),
        contextual_type_for(db, Some(with_both))
    );
    assert_eq!(strip_nullish(db, with_both), Some(point));
}
