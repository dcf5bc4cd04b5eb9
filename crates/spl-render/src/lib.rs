//! Rendering contexts for labeling documents.
//!
//! Turns an entity set and its assembled hierarchies into read-only records a
//! presentation layer can walk directly:
//!
//! - sections in outline preorder with depth and outline numbers
//! - nested text blocks, media, products and attachments per section
//! - products with ordered ingredients, packaging preorder and lot genealogy
//! - one unambiguous rendering decision per characteristic
//!
//! Collections are already ordered and presence flags are computed once.

mod characteristic;
mod document;
mod product;
mod section;

pub use characteristic::{CharacteristicRenderContext, render_kind};
pub use document::{DocumentRenderContext, PharmacologicClassContext, RenderContextBuilder};
pub use product::{
    IngredientContext, LotContext, PackagingContext, ProductEventContext, ProductRenderContext,
    RouteContext,
};
pub use section::{ContentBlockContext, MediaContext, SectionRenderContext};
