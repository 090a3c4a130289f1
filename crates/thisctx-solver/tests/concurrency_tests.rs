use rayon::prelude::*;
use thisctx_solver::{
    MemberDecl, TypeDatabase, TypeId, TypeInterner, declare_object_type, strip_nullish,
};

#[test]
fn concurrent_union_interning_agrees() {
    let interner = TypeInterner::new();

    let ids: Vec<TypeId> = (0..256)
        .into_par_iter()
        .map(|i| {
            let literal = interner.literal_number((i % 8) as f64);
            interner.union(vec![literal, TypeId::NULL, TypeId::UNDEFINED])
        })
        .collect();

    for (i, &id) in ids.iter().enumerate() {
        assert_eq!(id, ids[i % 8], "union for literal {} diverged", i % 8);
    }
}

#[test]
fn concurrent_object_declarations_share_ids() {
    let interner = TypeInterner::new();

    let ids: Vec<TypeId> = (0..128)
        .into_par_iter()
        .map(|_| {
            let db: &dyn TypeDatabase = &interner;
            let point = declare_object_type(
                db,
                vec![
                    MemberDecl::property(db.intern_string("x"), TypeId::NUMBER),
                    MemberDecl::property(db.intern_string("z"), TypeId::NUMBER)
                        .with_optional(true),
                ],
            )
            .expect("declaration succeeds");
            let nullable = db.union2(point, TypeId::NULL);
            strip_nullish(db, nullable).expect("non-nullish part")
        })
        .collect();

    assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
}
