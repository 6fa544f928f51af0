//! Lazily resolved references to coordinate reference systems.
//!
//! Geometry usually carries only a CRS identifier (`EPSG:4326`, an OGC URN, a URL). A [`CrsRef`] stores that
//! identifier together with a [`CrsResolver`] and turns it into a concrete [`Crs`] the first time the definition is
//! needed. The result is cached inside the reference and shared by all its clones.
//!
//! A resolver may return another reference instead of a definition (an alias). Such chains are followed until a
//! definition is found, so a reference always resolves to a [`Crs`], never to another reference.

use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::{trace, warn};
use tokio::sync::OnceCell;

use crate::error::CrsError;
use crate::geo::{Crs, CrsType};

/// Maximum number of references followed before resolution of a chain is given up.
pub const MAX_REFERENCE_HOPS: usize = 16;

/// Result of a single resolver lookup.
#[derive(Debug, Clone)]
pub enum CrsObject {
    /// Concrete definition.
    Crs(Arc<Crs>),
    /// Another reference that must be resolved in turn.
    Reference(CrsRef),
}

/// Source of CRS definitions for [`CrsRef`].
///
/// `Ok(None)` means the identifier is unknown to the resolver, `Err` that the lookup itself failed.
///
/// Any closure with the matching signature can be used as a resolver:
///
/// ```
/// use std::sync::Arc;
/// use orbis_types::error::CrsError;
/// use orbis_types::geo::{Crs, CrsObject, CrsRef, Datum};
///
/// let resolver = |uri: &str, _base: Option<&str>| {
///     Ok::<_, CrsError>(
///         (uri == "EPSG:4326").then(|| CrsObject::Crs(Arc::new(Crs::geographic("WGS 84", Datum::WGS84)))),
///     )
/// };
/// let crs_ref = CrsRef::new("EPSG:4326", Arc::new(resolver));
/// assert_eq!(crs_ref.resolve().unwrap().name(), "WGS 84");
/// ```
pub trait CrsResolver: Send + Sync {
    /// Looks up the identifier, `base_url` is used for relative identifiers.
    fn resolve(&self, uri: &str, base_url: Option<&str>) -> Result<Option<CrsObject>, CrsError>;
}

impl<F> CrsResolver for F
where
    F: Fn(&str, Option<&str>) -> Result<Option<CrsObject>, CrsError> + Send + Sync,
{
    fn resolve(&self, uri: &str, base_url: Option<&str>) -> Result<Option<CrsObject>, CrsError> {
        self(uri, base_url)
    }
}

struct RefInner {
    uri: String,
    base_url: Option<String>,
    axis_order_forced: bool,
    resolver: Option<Arc<dyn CrsResolver>>,
    resolved: OnceCell<Arc<Crs>>,
}

/// Reference to a CRS by identifier, resolved on first use.
///
/// Clones share the resolution cache. Resolution is safe to call from several threads at once: the resolver may be
/// invoked more than once in a race, but only the first stored result is kept and every caller observes it.
///
/// # Identity
///
/// Two references are equal when both resolve and their definitions are equal. If either fails to resolve, the
/// identifiers are compared instead. Hashing follows the same rule, so a reference that resolves only after it was
/// put into a hash map may end up in a different bucket than an equal one; resolve keys before using them in hashed
/// collections.
#[derive(Clone)]
pub struct CrsRef {
    inner: Arc<RefInner>,
}

impl CrsRef {
    /// Creates an unresolved reference.
    pub fn new(uri: impl Into<String>, resolver: Arc<dyn CrsResolver>) -> Self {
        Self::with_options(uri, None, false, Some(resolver))
    }

    /// Creates an unresolved reference with all options.
    ///
    /// If `axis_order_forced` is set, the resolved definition has its horizontal axes in east/north (x/y) order
    /// regardless of how the identifier defines them. A reference without a resolver can only be resolved if it
    /// was created from a definition.
    pub fn with_options(
        uri: impl Into<String>,
        base_url: Option<String>,
        axis_order_forced: bool,
        resolver: Option<Arc<dyn CrsResolver>>,
    ) -> Self {
        Self {
            inner: Arc::new(RefInner {
                uri: uri.into(),
                base_url,
                axis_order_forced,
                resolver,
                resolved: OnceCell::new(),
            }),
        }
    }

    /// Creates an already resolved reference to the definition.
    ///
    /// The identifier of the reference is the primary identifier of the definition, or its name if it has none.
    pub fn from_crs(crs: Arc<Crs>) -> Self {
        let uri = crs.id().unwrap_or(crs.name()).to_string();
        Self {
            inner: Arc::new(RefInner {
                uri,
                base_url: None,
                axis_order_forced: false,
                resolver: None,
                resolved: OnceCell::new_with(Some(crs)),
            }),
        }
    }

    /// Identifier the reference was created with.
    pub fn uri(&self) -> &str {
        &self.inner.uri
    }

    /// Base url for relative identifiers.
    pub fn base_url(&self) -> Option<&str> {
        self.inner.base_url.as_deref()
    }

    /// Whether x/y axis order is forced on the resolved definition. Does not trigger resolution.
    pub fn is_axis_order_forced(&self) -> bool {
        self.inner.axis_order_forced
    }

    /// Whether the reference has been resolved already.
    pub fn is_resolved(&self) -> bool {
        self.inner.resolved.initialized()
    }

    /// Cached definition, if the reference has been resolved. Does not trigger resolution.
    pub fn resolved(&self) -> Option<&Arc<Crs>> {
        self.inner.resolved.get()
    }

    /// Returns the definition, resolving the reference on first call.
    ///
    /// Failed resolution is not cached, a later call tries again.
    pub fn resolve(&self) -> Result<Arc<Crs>, CrsError> {
        if let Some(crs) = self.inner.resolved.get() {
            return Ok(crs.clone());
        }

        if self.inner.uri.is_empty() {
            return Err(CrsError::EmptyUri);
        }

        let (mut crs, forced) = self.follow_chain()?;
        if forced && !crs.is_xy_order() {
            crs = Arc::new(crs.to_xy_order());
        }

        // Another thread may have stored its result in the meantime, theirs wins.
        let _ = self.inner.resolved.set(crs.clone());
        Ok(self.inner.resolved.get().cloned().unwrap_or(crs))
    }

    /// Follows the chain to a definition. Returns whether any reference on the way forces x/y order.
    fn follow_chain(&self) -> Result<(Arc<Crs>, bool), CrsError> {
        let mut current = self.clone();
        let mut forced = false;

        for hop in 0..MAX_REFERENCE_HOPS {
            forced |= current.inner.axis_order_forced;
            if let Some(crs) = current.inner.resolved.get() {
                return Ok((crs.clone(), forced));
            }

            let Some(resolver) = &current.inner.resolver else {
                return Err(CrsError::NoResolver(current.inner.uri.clone()));
            };

            let object = resolver.resolve(&current.inner.uri, current.base_url())?;
            match object {
                None => return Err(CrsError::NotFound(current.inner.uri.clone())),
                Some(CrsObject::Crs(crs)) => return Ok((crs, forced)),
                Some(CrsObject::Reference(next)) => {
                    trace!(
                        "CRS reference '{}' points to '{}' (hop {})",
                        current.uri(),
                        next.uri(),
                        hop + 1
                    );
                    current = next;
                }
            }
        }

        warn!(
            "Reference chain starting at '{}' did not terminate after {MAX_REFERENCE_HOPS} hops",
            self.inner.uri
        );
        Err(CrsError::UnterminatedChain {
            uri: self.inner.uri.clone(),
            hops: MAX_REFERENCE_HOPS,
        })
    }

    /// Shape of the referenced CRS. Triggers resolution.
    pub fn crs_type(&self) -> Result<CrsType, CrsError> {
        Ok(self.resolve()?.crs_type())
    }

    /// Number of axes of the referenced CRS. Triggers resolution.
    pub fn dimension(&self) -> Result<usize, CrsError> {
        Ok(self.resolve()?.dimension())
    }
}

impl From<Arc<Crs>> for CrsRef {
    fn from(crs: Arc<Crs>) -> Self {
        Self::from_crs(crs)
    }
}

impl From<Crs> for CrsRef {
    fn from(crs: Crs) -> Self {
        Self::from_crs(Arc::new(crs))
    }
}

impl PartialEq for CrsRef {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }

        match (self.resolve(), other.resolve()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.inner.uri == other.inner.uri,
        }
    }
}

impl Eq for CrsRef {}

impl Hash for CrsRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.resolve() {
            Ok(crs) => crs.hash(state),
            Err(_) => self.inner.uri.hash(state),
        }
    }
}

impl Debug for CrsRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrsRef")
            .field("uri", &self.inner.uri)
            .field("base_url", &self.inner.base_url)
            .field("axis_order_forced", &self.inner.axis_order_forced)
            .field("resolved", &self.inner.resolved.get())
            .finish()
    }
}

impl Display for CrsRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner.uri)
    }
}
