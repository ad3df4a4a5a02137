//! Per-tier binding tables.

use std::sync::Arc;

use crate::combo::KeyCombination;
use crate::descriptor::BindingDescriptor;
use crate::error::HotkeysError;
use crate::scope::ScopeTag;

/// A registered binding: the parsed combination plus its declaration.
#[derive(Debug, Clone)]
pub struct Action {
    combination: KeyCombination,
    canonical: String,
    descriptor: BindingDescriptor,
}

impl Action {
    fn new(combination: KeyCombination, descriptor: BindingDescriptor) -> Self {
        Self {
            combination,
            canonical: combination.to_string(),
            descriptor,
        }
    }

    /// The parsed combination.
    pub fn combination(&self) -> &KeyCombination {
        &self.combination
    }

    /// The combination's canonical string form.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The declaration this action was built from.
    pub fn descriptor(&self) -> &BindingDescriptor {
        &self.descriptor
    }
}

/// The active bindings of one scope tier, in declaration order.
///
/// Storage is a shared snapshot: [`replace`](BindingTable::replace) builds a
/// new one and swaps it in, so a dispatch pass holding the old snapshot
/// never sees a half-built table.
#[derive(Debug, Clone)]
pub struct BindingTable {
    scope: ScopeTag,
    actions: Arc<[Action]>,
}

impl BindingTable {
    /// Create an empty table for `scope`.
    pub fn new(scope: ScopeTag) -> Self {
        Self {
            scope,
            actions: Arc::from(Vec::new()),
        }
    }

    /// Build a table for `scope` from declared bindings.
    ///
    /// Descriptors of the other tier are skipped. Fails on the first
    /// in-tier descriptor whose combination does not parse.
    pub fn from_descriptors(
        scope: ScopeTag,
        descriptors: &[BindingDescriptor],
    ) -> Result<Self, HotkeysError> {
        let mut actions = Vec::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.scope() != scope {
                continue;
            }
            let combination = KeyCombination::parse(&descriptor.combo).map_err(|source| {
                HotkeysError::InvalidBinding {
                    index,
                    label: descriptor.label.clone(),
                    source,
                }
            })?;
            actions.push(Action::new(combination, descriptor.clone()));
        }
        Ok(Self {
            scope,
            actions: actions.into(),
        })
    }

    /// Discard every binding and register the in-tier `descriptors` instead.
    ///
    /// On error the table keeps its previous contents.
    pub fn replace(&mut self, descriptors: &[BindingDescriptor]) -> Result<(), HotkeysError> {
        *self = Self::from_descriptors(self.scope, descriptors)?;
        tracing::debug!(scope = ?self.scope, count = self.count(), "replaced hotkey bindings");
        Ok(())
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.actions = Arc::from(Vec::new());
    }

    /// Number of registered bindings.
    pub fn count(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The tier this table accepts.
    pub fn scope(&self) -> ScopeTag {
        self.scope
    }

    /// The registered actions in declaration order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// A cheap handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<[Action]> {
        Arc::clone(&self.actions)
    }

    /// The registered declarations in declaration order.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.actions.iter().map(|a| a.descriptor.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComboParseError;

    fn bindings() -> Vec<BindingDescriptor> {
        vec![
            BindingDescriptor::new("ctrl+s", "Save"),
            BindingDescriptor::new("ctrl+p", "Palette").global(true),
            BindingDescriptor::new("j", "Down"),
            BindingDescriptor::new("shift+/", "Search help").global(true),
        ]
    }

    fn labels(table: &BindingTable) -> Vec<String> {
        table.descriptors().into_iter().map(|d| d.label).collect()
    }

    #[test]
    fn keeps_only_its_own_tier_in_order() {
        let mut local = BindingTable::new(ScopeTag::Local);
        let mut global = BindingTable::new(ScopeTag::Global);
        local.replace(&bindings()).unwrap();
        global.replace(&bindings()).unwrap();

        assert_eq!(labels(&local), ["Save", "Down"]);
        assert_eq!(labels(&global), ["Palette", "Search help"]);
        assert!(local.actions().iter().all(|a| !a.descriptor().global));
        assert!(global.actions().iter().all(|a| a.descriptor().global));
    }

    #[test]
    fn actions_carry_canonical_form() {
        let table = BindingTable::from_descriptors(ScopeTag::Global, &bindings()).unwrap();
        let canon: Vec<&str> = table.actions().iter().map(Action::canonical).collect();
        assert_eq!(canon, ["ctrl+p", "?"]);
    }

    #[test]
    fn replace_discards_previous_bindings() {
        let mut table = BindingTable::new(ScopeTag::Local);
        table.replace(&bindings()).unwrap();
        assert_eq!(table.count(), 2);

        table.replace(&[]).unwrap();
        assert_eq!(table.count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn clear_empties_table() {
        let mut table = BindingTable::new(ScopeTag::Local);
        table.replace(&bindings()).unwrap();
        table.clear();
        assert_eq!(table.count(), 0);
    }

    #[test]
    fn malformed_combo_fails_whole_replace() {
        let mut table = BindingTable::new(ScopeTag::Local);
        table.replace(&bindings()).unwrap();

        let mut broken = bindings();
        broken.push(BindingDescriptor::new("ctrl+nope", "Broken"));
        let err = table.replace(&broken).unwrap_err();

        assert_eq!(
            err,
            HotkeysError::InvalidBinding {
                index: 4,
                label: "Broken".into(),
                source: ComboParseError::UnknownKey {
                    combo: "ctrl+nope".into(),
                    key: "nope".into(),
                },
            }
        );
        assert!(err.to_string().contains("Broken"));
        // Previous contents survive a failed replace.
        assert_eq!(labels(&table), ["Save", "Down"]);
    }

    #[test]
    fn other_tier_combos_are_not_parsed() {
        let descriptors = vec![BindingDescriptor::new("", "Global junk").global(true)];
        let table = BindingTable::from_descriptors(ScopeTag::Local, &descriptors).unwrap();
        assert!(table.is_empty());
        assert!(BindingTable::from_descriptors(ScopeTag::Global, &descriptors).is_err());
    }

    #[test]
    fn snapshot_outlives_replace() {
        let mut table = BindingTable::new(ScopeTag::Local);
        table.replace(&bindings()).unwrap();
        let snapshot = table.snapshot();
        table.clear();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(table.count(), 0);
    }
}
