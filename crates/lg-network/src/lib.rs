//! `lg-network` — the logistic network: who needs what, who has it, and the
//! carriers that move it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`ledger`]   | `ProvideLedger`, `RequestLedger` — "on the way" reservations    |
//! | [`order`]    | `Order` — one reserved source → destination transfer            |
//! | [`buffer`]   | `OrderBuffer` — bounded, partially dequeuable order queue       |
//! | [`network`]  | `LogisticNetwork` — rebuff, assign, closest-base lookup         |
//! | [`base`]     | `BaseNode` + `dispatch_carriers` (throttled carrier spawn)      |
//! | [`carrier`]  | `Carrier`, `CarrierState` + `run_carriers` (state machine)      |
//! | [`movement`] | `Location`, `MovingObject` + `move_objects`                     |
//! | [`nodes`]    | helpers that assemble provider/requester/base entities          |
//! | [`event`]    | `NetworkEvent`                                                  |
//! | [`stats`]    | `NetworkStats` counters                                         |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                              |
//!
//! # Roles
//!
//! A node's role is the set of components it carries:
//!
//! | Role      | Components                                  |
//! |-----------|---------------------------------------------|
//! | provider  | `ProvideLedger`, `Location`, `Inventory`    |
//! | requester | `RequestLedger`, `Location`, `Inventory`    |
//! | base      | `BaseNode`, `Location`, `ProductionTimer`   |
//! | carrier   | `Carrier`, `Location`, `MovingObject`       |
//!
//! The network never holds references into the world; every operation takes
//! `&mut World` and resolves handles on use.  A handle whose entity has been
//! despawned resolves to "gone" and each system handles that case.
//!
//! # Reservation accounting
//!
//! Every order adds `+amount` to both its provider's and requester's ledger
//! when the matcher creates it, and exactly `-amount` to each over the rest of
//! its life: either `Order::cancel` (unassigned orders at the next rebuff) or
//! the carrier's pickup (provider side) and delivery (requester side).

pub mod base;
pub mod buffer;
pub mod carrier;
pub mod error;
pub mod event;
pub mod ledger;
pub mod movement;
pub mod network;
pub mod nodes;
pub mod order;
pub mod stats;


pub use base::{dispatch_carriers, BaseNode};
pub use buffer::OrderBuffer;
pub use carrier::{run_carriers, Carrier, CarrierState};
pub use error::{NetworkError, NetworkResult};
pub use event::NetworkEvent;
pub use ledger::{ProvideLedger, RequestLedger};
pub use movement::{move_objects, Location, MovingObject};
pub use network::{LogisticNetwork, RebuffOutcome};
pub use nodes::{spawn_base, spawn_provider, spawn_requester};
pub use order::Order;
pub use stats::NetworkStats;
