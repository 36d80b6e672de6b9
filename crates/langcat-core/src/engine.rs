//! Catalog Query Engine: normalize → lookup → filter → order → resolve
use crate::context::QueryContext;
use crate::data_model::{CatalogDocument, CatalogEntry, QuerySpec, Resolution};
use crate::error::CatalogError;
use crate::filter::ResultFilter;
use crate::resolver::{resolve, resolve_single};
use crate::store::CatalogStore;
use crate::version::sort_descending;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogQueryEngine {
    store: Arc<dyn CatalogStore>,
}

impl CatalogQueryEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Distinct language names, in the order the store first yields them.
    pub async fn language_names(&self, ctx: &QueryContext) -> Result<Vec<String>, CatalogError> {
        let docs = self.store.find_all().await?;
        ctx.checkpoint("distinct")?;

        let mut seen = HashSet::new();
        let names: Vec<String> = docs
            .into_iter()
            .map(|doc| doc.entry.name)
            .filter(|name| seen.insert(name.clone()))
            .collect();

        tracing::debug!(trace_id = %ctx.trace_id, count = names.len(), "language names");
        Ok(names)
    }

    /// Every entry for `name`, narrowed by `filter`, newest first.
    pub async fn entries_for_name(
        &self,
        ctx: &QueryContext,
        name: &str,
        filter: &ResultFilter,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let spec = QuerySpec::from_params(Some(name), None, None, None);
        self.fetch_ordered(ctx, &spec, filter).await
    }

    /// Entries for `name`@`version`, collapsed to one record when only one
    /// remains after filtering.
    pub async fn resolve_version(
        &self,
        ctx: &QueryContext,
        name: &str,
        version: &str,
        filter: &ResultFilter,
    ) -> Result<Resolution, CatalogError> {
        let spec = QuerySpec::from_params(Some(name), Some(version), None, None);
        self.query(ctx, &spec, filter).await
    }

    /// Entries for `name`@`version` on `platform`, newest first.
    pub async fn entries_for_platform(
        &self,
        ctx: &QueryContext,
        name: &str,
        version: &str,
        platform: &str,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let spec = QuerySpec::from_params(Some(name), Some(version), Some(platform), None);
        self.fetch_ordered(ctx, &spec, &ResultFilter::none()).await
    }

    /// The one record for a full key, or `Absent`.
    pub async fn resolve_exact(
        &self,
        ctx: &QueryContext,
        name: &str,
        version: &str,
        platform: &str,
        arch: &str,
    ) -> Result<Resolution, CatalogError> {
        let spec = QuerySpec::from_params(Some(name), Some(version), Some(platform), Some(arch));
        self.query(ctx, &spec, &ResultFilter::none()).await
    }

    /// General entry point.
    ///
    /// A fully bound spec is looked up with `find_one` and resolves to
    /// `One` or `Absent`. Anything else is fetched, filtered, ordered and
    /// resolved to `One` or `Many`.
    pub async fn query(
        &self,
        ctx: &QueryContext,
        spec: &QuerySpec,
        filter: &ResultFilter,
    ) -> Result<Resolution, CatalogError> {
        if spec.is_fully_bound() {
            let doc = self.store.find_one(spec).await?;
            ctx.checkpoint("filter")?;
            let entry = doc.map(CatalogDocument::into_entry).filter(|e| filter.matches(e));
            tracing::debug!(trace_id = %ctx.trace_id, found = entry.is_some(), "exact lookup");
            return Ok(resolve_single(entry));
        }

        let entries = self.fetch_ordered(ctx, spec, filter).await?;
        Ok(resolve(entries, false))
    }

    async fn fetch_ordered(
        &self,
        ctx: &QueryContext,
        spec: &QuerySpec,
        filter: &ResultFilter,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let docs = if spec.is_unbound() {
            self.store.find_all().await?
        } else {
            self.store.find_many(spec).await?
        };
        let fetched = docs.len();
        let entries: Vec<CatalogEntry> =
            docs.into_iter().map(CatalogDocument::into_entry).collect();

        ctx.checkpoint("filter")?;
        let mut entries = filter.apply(entries);

        ctx.checkpoint("sort")?;
        sort_descending(&mut entries);
        ctx.checkpoint("resolve")?;

        tracing::debug!(
            trace_id = %ctx.trace_id,
            ?spec,
            ?filter,
            fetched,
            kept = entries.len(),
            "catalog query"
        );
        Ok(entries)
    }
}
