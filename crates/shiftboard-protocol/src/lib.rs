//! `shiftboard-protocol`: JSON bodies exchanged over the REST interface.
//!
//! Record shapes (`Volunteer`, `TimeslotRecord`) live in `shiftboard-core`
//! and are sent as-is. This crate holds the request and response envelopes
//! around them, shared by the gateway and the planner's HTTP client.
//!
//! | Route                     | Request            | Response                |
//! |---------------------------|--------------------|-------------------------|
//! | `GET /volunteers`         | [`VolunteerQuery`] | `[Volunteer]`           |
//! | `POST /volunteers`        | [`NewVolunteer`]   | `Volunteer` (201)       |
//! | `GET /timeslots`          | none               | `[TimeslotRecord]`      |
//! | `POST /timeslots`         | [`TimeslotBody`]   | `TimeslotRecord` (201)  |
//! | `POST /timeslots/delete`  | [`TimeslotBody`]   | [`DeleteResponse`]      |
//!
//! Failures carry an [`ErrorBody`].

pub mod bodies;

pub use bodies::{
    DeleteResponse, ErrorBody, HealthResponse, NewVolunteer, TimeslotBody, VolunteerQuery,
};
