// formspec-core/src/runtime/store.rs
// ============================================================================
// Module: FormSpec In-Memory Store
// Description: Simple in-memory schema store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`SchemaStore`]
//! for tests and local demos. It is not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::core::FormSchema;
use crate::interfaces::SchemaStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory schema store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemorySchemaStore {
    /// Persisted schema slot protected by a mutex.
    schema: Arc<Mutex<Option<FormSchema>>>,
}

impl InMemorySchemaStore {
    /// Creates a new empty in-memory schema store.
    #[must_use]
    pub fn new() -> Self {
        Self { schema: Arc::new(Mutex::new(None)) }
    }

    /// Creates a store pre-populated with a schema.
    #[must_use]
    pub fn with_schema(schema: FormSchema) -> Self {
        Self { schema: Arc::new(Mutex::new(Some(schema))) }
    }
}

impl SchemaStore for InMemorySchemaStore {
    fn load(&self) -> Result<Option<FormSchema>, StoreError> {
        let guard = self
            .schema
            .lock()
            .map_err(|_| StoreError::Store("schema store mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, schema: &FormSchema) -> Result<(), StoreError> {
        let mut guard = self
            .schema
            .lock()
            .map_err(|_| StoreError::Store("schema store mutex poisoned".to_string()))?;
        *guard = Some(schema.clone());
        Ok(())
    }
}
