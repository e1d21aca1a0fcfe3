//! Workflow columns and their ordered registry.

use super::{BoardConfig, BoardDomainError, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A workflow stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    name: String,
    fixed: bool,
}

impl Column {
    fn new(name: &str, fixed: bool) -> Self {
        let trimmed = name.trim();
        Self {
            id: ColumnId::from_name(trimmed),
            name: trimmed.to_owned(),
            fixed,
        }
    }

    /// Returns the stable column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the entry and terminal stages.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }
}

/// Catalog of workflow columns plus the active display ordering.
///
/// The registry always holds an entry stage (where new and materialized
/// tasks land) and a terminal stage (where completed tasks go). Both are
/// flagged fixed and cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
    order: Vec<ColumnId>,
    entry: ColumnId,
    terminal: ColumnId,
}

impl ColumnRegistry {
    /// Builds the default registry described by `config`.
    ///
    /// Extra columns whose names are blank or collide with an existing
    /// column are skipped.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        let entry = Column::new(&config.entry_column, true);
        let terminal = Column::new(&config.terminal_column, true);
        let mut registry = Self {
            entry: entry.id.clone(),
            terminal: terminal.id.clone(),
            order: vec![entry.id.clone()],
            columns: vec![entry],
        };
        for name in &config.extra_columns {
            if ColumnId::from_name(name) == terminal.id {
                continue;
            }
            if let Err(err) = registry.add(name) {
                tracing::debug!(column = %name, error = %err, "skipping configured column");
            }
        }
        registry.order.push(terminal.id.clone());
        registry.columns.push(terminal);
        registry
    }

    /// Returns the entry stage identifier.
    #[must_use]
    pub const fn entry(&self) -> &ColumnId {
        &self.entry
    }

    /// Returns the terminal stage identifier.
    #[must_use]
    pub const fn terminal(&self) -> &ColumnId {
        &self.terminal
    }

    /// Returns `true` when `id` is the terminal stage.
    #[must_use]
    pub fn is_terminal(&self, id: &ColumnId) -> bool {
        self.terminal == *id
    }

    /// Returns `true` when `id` names an active column.
    #[must_use]
    pub fn contains(&self, id: &ColumnId) -> bool {
        self.order.contains(id)
    }

    /// Looks up a column by identifier.
    #[must_use]
    pub fn get(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == *id)
    }

    /// Resolves a column from either its identifier or its display name.
    ///
    /// Display names match case-insensitively.
    #[must_use]
    pub fn resolve(&self, name_or_id: &str) -> Option<&Column> {
        let wanted = name_or_id.trim();
        let as_id = ColumnId::from_name(wanted);
        self.get(&as_id).or_else(|| {
            self.columns
                .iter()
                .find(|column| column.name.eq_ignore_ascii_case(wanted))
        })
    }

    /// Iterates columns in display order.
    pub fn ordered(&self) -> impl Iterator<Item = &Column> + '_ {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// Returns the active ordering sequence.
    #[must_use]
    pub fn order(&self) -> &[ColumnId] {
        &self.order
    }

    /// Appends a new non-fixed column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] for blank names and
    /// [`BoardDomainError::DuplicateColumn`] when the normalized identifier
    /// or the display name (ignoring case) is already taken.
    pub fn add(&mut self, name: &str) -> Result<ColumnId, BoardDomainError> {
        if name.trim().is_empty() {
            return Err(BoardDomainError::EmptyColumnName);
        }
        let column = Column::new(name, false);
        let name_taken = self
            .columns
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&column.name));
        if name_taken || self.get(&column.id).is_some() {
            return Err(BoardDomainError::DuplicateColumn(column.id));
        }
        let id = column.id.clone();
        self.columns.push(column);
        self.order.push(id.clone());
        Ok(id)
    }

    /// Changes a column's display name; the identifier is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] for blank names,
    /// [`BoardDomainError::DuplicateColumn`] when another column already
    /// shows that name, and [`BoardDomainError::UnknownColumn`] when `id` is
    /// not registered.
    pub fn rename(&mut self, id: &ColumnId, new_name: &str) -> Result<(), BoardDomainError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyColumnName);
        }
        let clash = self
            .columns
            .iter()
            .any(|other| other.id != *id && other.name.eq_ignore_ascii_case(trimmed));
        if clash {
            return Err(BoardDomainError::DuplicateColumn(ColumnId::from_name(trimmed)));
        }
        let column = self
            .columns
            .iter_mut()
            .find(|column| column.id == *id)
            .ok_or_else(|| BoardDomainError::UnknownColumn(id.clone()))?;
        trimmed.clone_into(&mut column.name);
        Ok(())
    }

    /// Replaces the active ordering.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColumnOrder`] unless `sequence` is
    /// a permutation of the current column identifiers.
    pub fn reorder(&mut self, sequence: Vec<ColumnId>) -> Result<(), BoardDomainError> {
        let current: HashSet<&ColumnId> = self.order.iter().collect();
        let proposed: HashSet<&ColumnId> = sequence.iter().collect();
        if sequence.len() != self.order.len() || proposed != current {
            return Err(BoardDomainError::InvalidColumnOrder);
        }
        self.order = sequence;
        Ok(())
    }

    /// Removes a non-fixed column from catalog and ordering.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownColumn`] when `id` is not
    /// registered and [`BoardDomainError::FixedColumn`] for fixed columns.
    pub fn remove(&mut self, id: &ColumnId) -> Result<Column, BoardDomainError> {
        let position = self
            .columns
            .iter()
            .position(|column| column.id == *id)
            .ok_or_else(|| BoardDomainError::UnknownColumn(id.clone()))?;
        if self.columns.get(position).is_some_and(Column::is_fixed) {
            return Err(BoardDomainError::FixedColumn(id.clone()));
        }
        self.order.retain(|existing| existing != id);
        Ok(self.columns.remove(position))
    }

    /// Checks the structural invariants of a registry loaded from storage.
    ///
    /// The ordering must list every catalog column exactly once and both
    /// fixed stages must be present and flagged fixed.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let catalog: HashSet<&ColumnId> = self.columns.iter().map(Column::id).collect();
        let ordered: HashSet<&ColumnId> = self.order.iter().collect();
        let fixed_present = [&self.entry, &self.terminal]
            .into_iter()
            .all(|id| self.get(id).is_some_and(Column::is_fixed));
        catalog.len() == self.columns.len()
            && ordered.len() == self.order.len()
            && catalog == ordered
            && fixed_present
            && self.entry != self.terminal
    }
}
