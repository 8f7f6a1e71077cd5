//! Entity type descriptors
//!
//! A descriptor is the frozen result of a record's schema declaration: table
//! name, ordered column set, identifier, and construction recipe. Field
//! access goes through accessor closures bound when the column was declared.

use crate::errors::{MappingError, Result};
use crate::mapping::schema::{Record, SchemaBuilder};
use crate::mapping::value::{ColumnValue, Value, ValueKind};
use std::fmt;

type ReadFn<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
type WriteFn<T> = Box<dyn Fn(&mut T, Value) -> Result<()> + Send + Sync>;

/// One mapped field: column name, value kind and accessor pair
pub struct FieldDescriptor<T> {
    column: &'static str,
    kind: ValueKind,
    nullable: bool,
    read: ReadFn<T>,
    write: WriteFn<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    pub(crate) fn bind<V>(
        column: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self
    where
        V: ColumnValue + 'static,
    {
        let read: ReadFn<T> = Box::new(move |record: &T| get(record).to_value());
        let write: WriteFn<T> = Box::new(move |record: &mut T, value: Value| {
            let slot = get_mut(record);
            match V::from_value(value) {
                Ok(v) => {
                    *slot = v;
                    Ok(())
                }
                Err(Value::Null) => Err(MappingError::UnexpectedNull {
                    column: column.to_string(),
                }),
                Err(rejected) => Err(MappingError::ColumnKindMismatch {
                    column: column.to_string(),
                    expected: V::KIND,
                    actual: rejected.kind_name(),
                }),
            }
        });

        Self {
            column,
            kind: V::KIND,
            nullable: V::NULLABLE,
            read,
            write,
        }
    }
}

impl<T> FieldDescriptor<T> {
    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Read the field's current value from a record
    pub fn read(&self, record: &T) -> Value {
        (self.read)(record)
    }

    /// Store a column value into the record's field
    ///
    /// # Errors
    ///
    /// `UnexpectedNull` for NULL into a non-optional field,
    /// `ColumnKindMismatch` for a value of another kind.
    pub fn write(&self, record: &mut T, value: Value) -> Result<()> {
        (self.write)(record, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("column", &self.column)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// Derived mapping metadata for one record type
pub struct EntityDescriptor<T> {
    record_type: &'static str,
    table: Option<&'static str>,
    fields: Vec<FieldDescriptor<T>>,
    identifier: Option<usize>,
    construct: fn() -> T,
}

impl<T: Record> EntityDescriptor<T> {
    /// Run the record's schema declaration and validate the result
    ///
    /// # Errors
    ///
    /// - `NoConstructor` if no construction recipe was declared
    /// - `EmptyMapping` if no column was declared
    /// - `DuplicateColumn` if two fields share a column name (case-insensitive)
    /// - `DuplicateIdentifier` if more than one field is marked as identifier
    pub fn derive() -> Result<Self> {
        let record_type = std::any::type_name::<T>();
        let mut builder = SchemaBuilder::new();
        T::declare(&mut builder);
        let (table, construct, fields, identifiers) = builder.into_parts();

        let construct = construct.ok_or(MappingError::NoConstructor { record_type })?;

        if fields.is_empty() {
            return Err(MappingError::EmptyMapping { record_type });
        }

        for (i, field) in fields.iter().enumerate() {
            let clash = fields[..i]
                .iter()
                .any(|earlier| earlier.column.eq_ignore_ascii_case(field.column));
            if clash {
                return Err(MappingError::DuplicateColumn {
                    record_type,
                    column: field.column,
                });
            }
        }

        if let [first, second, ..] = identifiers.as_slice() {
            return Err(MappingError::DuplicateIdentifier {
                record_type,
                first: fields[*first].column,
                second: fields[*second].column,
            });
        }

        tracing::debug!(
            record_type,
            table = table.unwrap_or("<projection>"),
            columns = fields.len(),
            "derived entity descriptor"
        );

        Ok(Self {
            record_type,
            table,
            fields,
            identifier: identifiers.first().copied(),
            construct,
        })
    }
}

impl<T> EntityDescriptor<T> {
    /// Fully qualified Rust type name of the record
    pub fn record_type(&self) -> &'static str {
        self.record_type
    }

    /// Declared table, `None` for projection types
    pub fn table(&self) -> Option<&'static str> {
        self.table
    }

    /// Declared table
    ///
    /// # Errors
    ///
    /// `MissingTable` for projection types.
    pub fn require_table(&self) -> Result<&'static str> {
        self.table.ok_or(MappingError::MissingTable {
            record_type: self.record_type,
        })
    }

    /// Mapped fields in registration order
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field(&self, column: &str) -> Option<&FieldDescriptor<T>> {
        self.fields
            .iter()
            .find(|f| f.column.eq_ignore_ascii_case(column))
    }

    pub fn identifier(&self) -> Option<&FieldDescriptor<T>> {
        self.identifier.map(|i| &self.fields[i])
    }

    /// Identifier field
    ///
    /// # Errors
    ///
    /// `NoIdentifier` when the record declares none.
    pub fn require_identifier(&self) -> Result<&FieldDescriptor<T>> {
        self.identifier().ok_or(MappingError::NoIdentifier {
            record_type: self.record_type,
        })
    }

    /// Every field except the identifier, in registration order
    pub fn non_identifier_fields(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != self.identifier)
            .map(|(_, f)| f)
    }

    /// Column names in registration order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.column)
    }

    /// Allocate a blank record
    pub fn instantiate(&self) -> T {
        (self.construct)()
    }
}

impl<T> fmt::Debug for EntityDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("record_type", &self.record_type)
            .field("table", &self.table)
            .field("fields", &self.fields)
            .field("identifier", &self.identifier().map(|i| i.column))
            .finish()
    }
}
