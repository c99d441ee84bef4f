//! Address naming and synthesized labels for anonymous list calls
//!
//! Names are looked up in a fixed order: the batch's overlay snapshot first,
//! then the static symbol table, then the raw hex address.
//!
//! Many nested-list calls target buffers built at runtime that neither table
//! knows about. [`label_anonymous_calls`] names such a call after the named
//! lists it eventually reaches, e.g. `wall_dl+floor_dl`.

use super::{MemoryOverlay, SymbolTable};
use crate::domain::Address;
use crate::trace::{ListArena, ListId};

/// Name lookup chain: overlay snapshot → symbol table → hex
#[derive(Debug, Clone, Copy)]
pub struct AddressNamer<'a> {
    overlay: &'a MemoryOverlay,
    symbols: &'a SymbolTable,
}

impl<'a> AddressNamer<'a> {
    #[must_use]
    pub fn new(overlay: &'a MemoryOverlay, symbols: &'a SymbolTable) -> Self {
        Self { overlay, symbols }
    }

    /// Symbolic name for `address`, if either table has one
    #[must_use]
    pub fn name(&self, address: Address) -> Option<&'a str> {
        self.overlay.get(address).or_else(|| self.symbols.get(address))
    }

    /// Symbolic name, or the hex address when unnamed
    #[must_use]
    pub fn format(&self, address: Address) -> String {
        self.name(address).map_or_else(|| address.to_string(), str::to_string)
    }
}

/// Give every unnamed top-level call in `root` a label built from its callees
///
/// For each nested-list call of the root list whose target has no name, the
/// callee tree is walked depth-first collecting the names of named calls; an
/// unnamed call is only entered when it could not be named itself. The names
/// are joined with `+` and written into `overlay` under the call's target.
/// Calls whose subtree yields no names stay unnamed.
///
/// Returns the number of labels added.
pub fn label_anonymous_calls(
    overlay: &mut MemoryOverlay,
    symbols: &SymbolTable,
    arena: &ListArena,
    root: ListId,
) -> usize {
    let mut added = 0;

    for node in arena.list(root) {
        if !node.command.opcode.is_call() {
            continue;
        }
        let target = node.command.target();
        if AddressNamer::new(overlay, symbols).name(target).is_some() {
            continue;
        }
        let Some(child) = node.child else {
            continue;
        };

        let mut names = Vec::new();
        collect_callee_names(&AddressNamer::new(overlay, symbols), arena, child, &mut names);

        if !names.is_empty() {
            overlay.set(target, names.join("+"));
            added += 1;
        }
    }

    added
}

fn collect_callee_names(
    namer: &AddressNamer<'_>,
    arena: &ListArena,
    list: ListId,
    names: &mut Vec<String>,
) {
    for node in arena.list(list) {
        if !node.command.opcode.is_call() {
            continue;
        }
        if let Some(name) = namer.name(node.command.target()) {
            names.push(name.to_string());
        } else if let Some(child) = node.child {
            collect_callee_names(namer, arena, child, names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Opcode;
    use crate::trace::{CommandWords, ListBuilder, ListDirective};
    use dlprof_common::{G_DL, G_ENDDL, G_FILLRECT};

    fn dl(depth: usize, opcode: u8, word1: u32) -> ListDirective {
        ListDirective { depth, command: CommandWords { opcode: Opcode(opcode), word0: 0, word1 } }
    }

    fn build(directives: &[ListDirective]) -> (ListArena, ListId) {
        let mut builder = ListBuilder::new();
        for d in directives {
            builder.apply(d).unwrap();
        }
        let root = builder.current_root().unwrap();
        (builder.into_arena(), root)
    }

    #[test]
    fn test_namer_prefers_overlay() {
        let symbols = SymbolTable::parse("0xffffffff00000010 from_symbols\n");
        let mut overlay = MemoryOverlay::new();
        let namer = AddressNamer::new(&overlay, &symbols);
        assert_eq!(namer.format(Address(0x10)), "from_symbols");
        assert_eq!(namer.format(Address(0x20)), "0x00000020");

        overlay.set(Address(0x10), "from_overlay");
        let namer = AddressNamer::new(&overlay, &symbols);
        assert_eq!(namer.format(Address(0x10)), "from_overlay");
    }

    #[test]
    fn test_anonymous_call_is_labelled_from_callees() {
        let symbols = SymbolTable::parse(
            "0xffffffff00000100 wall_dl\n0xffffffff00000200 floor_dl\n",
        );
        let (arena, root) = build(&[
            dl(0, G_DL, 0x0600_0000),
            dl(1, G_DL, 0x100),
            dl(2, G_ENDDL, 0),
            dl(1, G_FILLRECT, 0),
            dl(1, G_DL, 0x0700_0000),
            dl(2, G_DL, 0x200),
            dl(3, G_ENDDL, 0),
            dl(2, G_ENDDL, 0),
            dl(1, G_ENDDL, 0),
        ]);

        let mut overlay = MemoryOverlay::new();
        let added = label_anonymous_calls(&mut overlay, &symbols, &arena, root);

        assert_eq!(added, 1);
        assert_eq!(overlay.get(Address(0x0600_0000)), Some("wall_dl+floor_dl"));
        // Only top-level calls receive labels
        assert_eq!(overlay.get(Address(0x0700_0000)), None);
    }

    #[test]
    fn test_named_calls_are_not_relabelled() {
        let symbols = SymbolTable::parse("0xffffffff00000100 inner\n");
        let (arena, root) = build(&[dl(0, G_DL, 0x500), dl(1, G_DL, 0x100), dl(2, G_ENDDL, 0)]);

        let mut overlay = MemoryOverlay::new();
        overlay.set(Address(0x500), "outer");
        assert_eq!(label_anonymous_calls(&mut overlay, &symbols, &arena, root), 0);
        assert_eq!(overlay.get(Address(0x500)), Some("outer"));
    }

    #[test]
    fn test_named_callee_is_not_entered() {
        let symbols = SymbolTable::parse(
            "0xffffffff00000100 mid\n0xffffffff00000200 deep\n",
        );
        let (arena, root) = build(&[
            dl(0, G_DL, 0x500),
            dl(1, G_DL, 0x100),
            dl(2, G_DL, 0x200),
            dl(3, G_ENDDL, 0),
            dl(2, G_ENDDL, 0),
        ]);

        let mut overlay = MemoryOverlay::new();
        label_anonymous_calls(&mut overlay, &symbols, &arena, root);
        assert_eq!(overlay.get(Address(0x500)), Some("mid"));
    }

    #[test]
    fn test_call_without_named_callees_stays_unnamed() {
        let symbols = SymbolTable::default();
        let (arena, root) = build(&[dl(0, G_DL, 0x500), dl(1, G_FILLRECT, 0), dl(1, G_ENDDL, 0)]);

        let mut overlay = MemoryOverlay::new();
        assert_eq!(label_anonymous_calls(&mut overlay, &symbols, &arena, root), 0);
        assert!(overlay.is_empty());
    }
}
