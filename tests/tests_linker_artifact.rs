//! Inter-artifact linking: resolving into precompiled, read-only module
//! roots without reparsing their source.

mod helpers;

use helpers::*;
use yangc::linker::{ImportDecl, LinkSession};
use yangc::model::{BuiltInType, NodeKind, ResolvableStatus};

/// Builds a resolved artifact module with a string typedef, the shape a
/// dependency jar would hand back.
fn artifact_with_typedef(session: &mut LinkSession, module_name: &str, typedef_name: &str) {
    let root = module(session, module_name, "");
    typedef(session, root, typedef_name, None, "string", 1);
    session.add_artifact(root, None);
}

#[test]
fn derived_type_resolves_into_artifact() {
    let mut session = LinkSession::new();
    artifact_with_typedef(&mut session, "portpair", "tenant-id");

    let root = module(&mut session, "flow-classifier", "flow-classifier.yang");
    let leaf = typed_leaf(&mut session, root, "tenant-id", Some("pp"), "tenant-id", 6);
    let mut entry = file_entry(&session, root, "fc");
    entry.imports = vec![ImportDecl::new("portpair", "pp")];
    entry.entities = vec![derived_type_entity(&session, leaf, Some("pp"), "tenant-id")];
    session.add_file(entry);

    session.link().unwrap();

    let info = session.arena()[leaf].type_info.as_ref().unwrap();
    assert_eq!(info.status, ResolvableStatus::Resolved);
    let referred = info.referred_typedef.unwrap();
    assert_eq!(session.arena()[referred].name, "tenant-id");
    // Effective built-in type is carried through the artifact's typedef.
    assert_eq!(info.effective, Some(BuiltInType::String));
}

#[test]
fn artifact_subtree_is_tagged_non_generable() {
    let mut session = LinkSession::new();
    artifact_with_typedef(&mut session, "portpair", "tenant-id");

    let root = module(&mut session, "app", "app.yang");
    let leaf = typed_leaf(&mut session, root, "t", Some("pp"), "tenant-id", 2);
    let mut entry = file_entry(&session, root, "app");
    entry.imports = vec![ImportDecl::new("portpair", "pp")];
    entry.entities = vec![derived_type_entity(&session, leaf, Some("pp"), "tenant-id")];
    session.add_file(entry);

    session.link().unwrap();

    let artifact_root = session.module_root("portpair").unwrap();
    assert!(!session.arena()[artifact_root].generable);
    for child in session.arena().children(artifact_root).collect::<Vec<_>>() {
        assert!(!session.arena()[child].generable);
    }
    // The building module keeps generating.
    assert!(session.arena()[root].generable);
    assert!(session.arena()[leaf].generable);
}

#[test]
fn grouping_from_artifact_is_cloned_as_generable() {
    let mut session = LinkSession::new();

    let lib_root = module(&mut session, "lib", "");
    let grouping = child(&mut session, lib_root, NodeKind::Grouping, "flow", 1);
    typed_leaf(&mut session, grouping, "id", None, "string", 2);
    session.add_artifact(lib_root, None);

    let app_root = module(&mut session, "app", "app.yang");
    let uses = uses_node(&mut session, app_root, Some("l"), "flow", 2);
    let mut entry = file_entry(&session, app_root, "app");
    entry.imports = vec![ImportDecl::new("lib", "l")];
    entry.entities = vec![uses_entity(&session, uses, Some("l"), "flow")];
    session.add_file(entry);

    session.link().unwrap();
    assert!(all_resolved(&session));

    let id = find_child(session.arena(), app_root, "id").unwrap();
    assert_eq!(session.arena()[id].namespace, "app");
    assert!(session.arena()[id].generable);
    // The artifact's own child is still the non-generable original.
    let original = session.arena().children(grouping).next().unwrap();
    assert_ne!(original, id);
    assert!(!session.arena()[original].generable);
}

#[test]
fn import_revision_selects_exact_artifact() {
    let mut session = LinkSession::new();

    // Two revisions of the same module with incompatible typedefs.
    let old_root = module(&mut session, "dep", "");
    typedef(&mut session, old_root, "token", None, "string", 1);
    session.add_artifact(old_root, Some("2016-05-24".into()));

    let new_root = module(&mut session, "dep", "");
    typedef(&mut session, new_root, "token", None, "uint8", 1);
    session.add_artifact(new_root, Some("2017-01-01".into()));

    let root = module(&mut session, "app", "app.yang");
    let leaf = typed_leaf(&mut session, root, "t", Some("d"), "token", 2);
    let mut entry = file_entry(&session, root, "app");
    entry.imports = vec![ImportDecl {
        module: "dep".into(),
        prefix: "d".into(),
        revision: Some("2016-05-24".into()),
    }];
    entry.entities = vec![derived_type_entity(&session, leaf, Some("d"), "token")];
    session.add_file(entry);

    session.link().unwrap();
    let info = session.arena()[leaf].type_info.as_ref().unwrap();
    assert_eq!(info.effective, Some(BuiltInType::String));
}
