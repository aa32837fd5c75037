//! Intra-file linking: lexical scoping, typedef chains, grouping reuse
//! within one module, and convergence failures.

mod helpers;

use helpers::*;
use yangc::diagnostics::DiagnosticKind;
use yangc::linker::LinkSession;
use yangc::model::{BuiltInType, NodeKind, ResolvableStatus};

#[test]
fn forward_typedef_chain_resolves_via_sweep() {
    let mut session = LinkSession::new();
    let root = module(&mut session, "inet", "inet.yang");

    // leaf references typedef `a` before it is declared; `a` itself derives
    // from `b`, declared last.
    let leaf = typed_leaf(&mut session, root, "port", None, "a", 2);
    let td_a = typedef(&mut session, root, "a", None, "b", 5);
    let td_b = typedef(&mut session, root, "b", None, "uint16", 8);

    let mut entry = file_entry(&session, root, "inet");
    entry.entities = vec![
        derived_type_entity(&session, leaf, None, "a"),
        derived_type_entity(&session, td_a, None, "b"),
    ];
    session.add_file(entry);

    session.link().unwrap();

    assert!(all_resolved(&session));
    let info = session.arena()[leaf].type_info.as_ref().unwrap();
    assert_eq!(info.status, ResolvableStatus::Resolved);
    assert_eq!(info.referred_typedef, Some(td_a));
    assert_eq!(info.effective, Some(BuiltInType::Uint16));
    assert_eq!(
        session.arena()[td_a].type_info.as_ref().unwrap().referred_typedef,
        Some(td_b)
    );
}

#[test]
fn nearest_enclosing_scope_wins() {
    let mut session = LinkSession::new();
    let root = module(&mut session, "m", "m.yang");

    typedef(&mut session, root, "size", None, "uint8", 1);
    let container = child(&mut session, root, NodeKind::Container, "box", 3);
    let inner = typedef(&mut session, container, "size", None, "string", 4);
    let leaf = typed_leaf(&mut session, container, "label", None, "size", 5);

    let mut entry = file_entry(&session, root, "m");
    entry.entities = vec![derived_type_entity(&session, leaf, None, "size")];
    session.add_file(entry);

    session.link().unwrap();

    let info = session.arena()[leaf].type_info.as_ref().unwrap();
    assert_eq!(info.referred_typedef, Some(inner));
    assert_eq!(info.effective, Some(BuiltInType::String));
}

#[test]
fn two_uses_sites_get_independent_subtrees() {
    let mut session = LinkSession::new();
    let root = module(&mut session, "c", "c.yang");

    let grouping = child(&mut session, root, NodeKind::Grouping, "g", 1);
    typed_leaf(&mut session, grouping, "id", None, "string", 2);
    let first = child(&mut session, root, NodeKind::Container, "north", 5);
    let second = child(&mut session, root, NodeKind::Container, "south", 8);
    let uses_first = uses_node(&mut session, first, None, "g", 6);
    let uses_second = uses_node(&mut session, second, None, "g", 9);

    let mut entry = file_entry(&session, root, "c");
    entry.entities = vec![
        uses_entity(&session, uses_first, None, "g"),
        uses_entity(&session, uses_second, None, "g"),
    ];
    session.add_file(entry);

    session.link().unwrap();
    assert!(all_resolved(&session));

    let id_first = find_child(session.arena(), first, "id").unwrap();
    let id_second = find_child(session.arena(), second, "id").unwrap();
    assert_ne!(id_first, id_second);
    assert_eq!(session.arena()[id_first].parent(), Some(first));
    assert_eq!(session.arena()[id_second].parent(), Some(second));

    // Mutating one clone must not leak into the other.
    session.arena_mut()[id_first].description = Some("north id".into());
    assert_eq!(session.arena()[id_second].description, None);
}

#[test]
fn identity_base_resolves_within_file() {
    let mut session = LinkSession::new();
    let root = module(&mut session, "crypto", "crypto.yang");

    let base = child(&mut session, root, NodeKind::Identity, "algorithm", 1);
    let aes = child(&mut session, root, NodeKind::Identity, "aes", 3);

    let mut entry = file_entry(&session, root, "crypto");
    entry.entities = vec![identity_base_entity(&session, aes, None, "algorithm")];
    session.add_file(entry);

    session.link().unwrap();
    assert!(all_resolved(&session));
    assert_eq!(session.arena()[aes].bases, vec![base]);
}

#[test]
fn circular_typedefs_report_convergence_error() {
    let mut session = LinkSession::new();
    let root = module(&mut session, "loop", "loop.yang");

    let td_a = typedef(&mut session, root, "a", None, "b", 1);
    let td_b = typedef(&mut session, root, "b", None, "a", 2);

    let mut entry = file_entry(&session, root, "loop");
    entry.entities = vec![
        derived_type_entity(&session, td_a, None, "b"),
        derived_type_entity(&session, td_b, None, "a"),
    ];
    session.add_file(entry);

    let failure = session.link().unwrap_err();
    assert_eq!(failure.diagnostics.len(), 2);
    assert!(
        failure
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::Convergence)
    );
}

#[test]
fn grouping_using_itself_fails_to_converge() {
    let mut session = LinkSession::new();
    let root = module(&mut session, "m", "m.yang");

    let grouping = child(&mut session, root, NodeKind::Grouping, "g", 1);
    let uses = uses_node(&mut session, grouping, None, "g", 2);

    let mut entry = file_entry(&session, root, "m");
    entry.entities = vec![uses_entity(&session, uses, None, "g")];
    session.add_file(entry);

    let failure = session.link().unwrap_err();
    assert!(
        failure
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Convergence)
    );
}
