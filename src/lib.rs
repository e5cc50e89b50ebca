//! Placement and manipulation engine for custom bottle label elements.
//!
//! The engine owns what happens between a pointer event on the label design
//! surface and the element geometry that results from it: hit-testing text and
//! image elements (rotation-aware), moving them, resizing them from any of
//! eight handles, and rotating them around their center. Rendering, asset
//! loading and persistence belong to the host; it wires pointer events into
//! [`engine::Engine`] and acts on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Host-facing [`engine::Engine`] and the label-space [`engine::EngineCore`] state machine |
//! | [`element`] | Label elements, their geometry, patches, and the ordered label store |
//! | [`geometry`] | Stateless transforms, hit detection, resize and rotation math |
//! | [`hit`] | Handles, cursor hints, and the label-wide hit-test policy |
//! | [`input`] | Tools, buttons, keys, and the gesture states |
//! | [`units`] | Label-space and device-pixel points and the viewport between them |
//! | [`config`] | Handle sizes with environment overrides |
//! | [`replay`] | JSON pointer scripts replayed against an engine |
//! | [`consts`] | Shared numeric constants (size floor, hit padding, handle defaults) |

pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod replay;
pub mod units;
