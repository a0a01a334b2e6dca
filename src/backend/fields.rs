//! Sparse issue payloads.
//!
//! An [`IssueFields`] holds only the fields a caller explicitly set. A field
//! that is absent is left untouched by the tracker. There is no way to clear
//! a field: setting a value always means "write this value".

use std::collections::BTreeMap;

/// Fields accepted by issue create/update calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueField {
    ProjectId,
    Summary,
    Description,
    IssueTypeId,
    StatusId,
    PriorityId,
    AssigneeId,
    CategoryId,
    MilestoneId,
    VersionId,
    StartDate,
    DueDate,
}

impl IssueField {
    /// Backlog form parameter name. List-valued fields use the `[]` suffix.
    pub fn param_name(self) -> &'static str {
        match self {
            IssueField::ProjectId => "projectId",
            IssueField::Summary => "summary",
            IssueField::Description => "description",
            IssueField::IssueTypeId => "issueTypeId",
            IssueField::StatusId => "statusId",
            IssueField::PriorityId => "priorityId",
            IssueField::AssigneeId => "assigneeId",
            IssueField::CategoryId => "categoryId[]",
            IssueField::MilestoneId => "milestoneId[]",
            IssueField::VersionId => "versionId[]",
            IssueField::StartDate => "startDate",
            IssueField::DueDate => "dueDate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Id(i64),
    Ids(Vec<i64>),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    values: BTreeMap<IssueField, FieldValue>,
}

impl IssueFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, field: IssueField, id: i64) -> Self {
        self.values.insert(field, FieldValue::Id(id));
        self
    }

    pub fn ids(mut self, field: IssueField, ids: Vec<i64>) -> Self {
        self.values.insert(field, FieldValue::Ids(ids));
        self
    }

    pub fn text(mut self, field: IssueField, text: impl Into<String>) -> Self {
        self.values.insert(field, FieldValue::Text(text.into()));
        self
    }

    /// Set `field` only when `id` is present.
    pub fn maybe_id(self, field: IssueField, id: Option<i64>) -> Self {
        match id {
            Some(id) => self.id(field, id),
            None => self,
        }
    }

    pub fn maybe_ids(self, field: IssueField, ids: Option<Vec<i64>>) -> Self {
        match ids {
            Some(ids) => self.ids(field, ids),
            None => self,
        }
    }

    pub fn maybe_text(self, field: IssueField, text: Option<String>) -> Self {
        match text {
            Some(text) => self.text(field, text),
            None => self,
        }
    }

    pub fn get(&self, field: IssueField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn contains(&self, field: IssueField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IssueField, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Flatten into form parameters, repeating list fields once per element.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = Vec::with_capacity(self.values.len());
        for (field, value) in self.iter() {
            let name = field.param_name();
            match value {
                FieldValue::Id(id) => form.push((name, id.to_string())),
                FieldValue::Ids(ids) => {
                    form.extend(ids.iter().map(|id| (name, id.to_string())));
                }
                FieldValue::Text(text) => form.push((name, text.clone())),
            }
        }
        form
    }
}
