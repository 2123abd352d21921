//! Backend for a group trip planner: browse hotels per city, hold one
//! active hotel choice per city per voter, and watch the group's picks
//! aggregate in real time (well, polled time).

pub mod config;
pub mod error;
pub mod trip;
pub mod web;
