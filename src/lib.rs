#![warn(missing_docs)]

//! # service-browser
//!
//! An interactive service catalog page for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! service-browser provides a complete, embeddable "services" page in the Elm
//! Architecture: a [`page::Model`] holding all page state, an `update()`
//! method processing key input and asynchronous completions, and a `view()`
//! method rendering the page as a styled string. Remote data access,
//! mutations, routing, and error display are collaborator traits injected at
//! construction time, so the page never reaches into ambient state and is
//! fully testable with in-memory fakes.
//!
//! ## Components
//!
//! - **`page`**: the page controller: fetch lifecycle, filtering, pagination,
//!   selection/route synchronization, and the create/update/delete flows
//!   (including the deactivate confirmation dialog)
//! - **`filter`**: pure name filtering over service records
//! - **`paginator`**: 1-indexed pagination state and rendering
//! - **`searchbox`**: a minimal single-line query input
//! - **`record`**: the service/account/group/payload data model
//! - **`route`**: the route surface the page navigates over
//! - **`gateway`**: the collaborator traits the page consumes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use service_browser::prelude::*;
//!
//! let mut page = ServicesPage::new(gateway, actions, router, errors, prefs);
//! let fetches = page.mount(); // commands for the bubbletea runtime
//! // ...deliver completion messages and key messages through page.update(msg)
//! println!("{}", page.view());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! The page is a component, not a program: embed it in your own
//! `bubbletea_rs::Model`, forward messages to [`page::Model::update`], batch
//! the commands returned by [`page::Model::mount`], and splice
//! [`page::Model::view`] into your layout.

pub mod error;
pub mod filter;
pub mod gateway;
pub mod key;
pub mod page;
pub mod paginator;
pub mod record;
pub mod route;
pub mod searchbox;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Focused components receive keyboard input and should indicate their active
/// state visually; blurred components ignore input. The page uses this to
/// route key messages to the search box only while it holds focus.
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for initialization work (starting a cursor blink,
    /// triggering a redraw). Components with nothing to schedule return
    /// `None`.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use error::{ActionError, FetchError, PageError};
pub use filter::filter_services;
pub use gateway::{
    ActionFuture, ErrorChannel, FetchFuture, PreferenceStore, Router, ServiceActions,
    ServiceGateway,
};
pub use key::{Binding, KeyMap};
pub use page::{
    Model as ServicesPage, PageKeyMap, PageStyles, PendingVerb, RouteChangedMsg, Selection,
};
pub use paginator::Model as Paginator;
pub use record::{
    Account, AccountId, Collection, Group, GroupId, Payload, Service, ServiceDraft, ServiceId,
    ServicePatch, ServiceToken,
};
pub use route::Route;
pub use searchbox::Model as SearchBox;

/// Prelude module for convenient imports.
///
/// Re-exports the types most applications need to embed the services page:
///
/// ```rust
/// use service_browser::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ActionError, FetchError, PageError};
    pub use crate::gateway::{
        ErrorChannel, PreferenceStore, Router, ServiceActions, ServiceGateway,
    };
    pub use crate::key::{Binding, KeyMap};
    pub use crate::page::{Model as ServicesPage, RouteChangedMsg, Selection};
    pub use crate::record::{
        Account, Collection, Group, Payload, Service, ServiceDraft, ServiceId, ServicePatch,
        ServiceToken,
    };
    pub use crate::route::Route;
    pub use crate::Component;
}
