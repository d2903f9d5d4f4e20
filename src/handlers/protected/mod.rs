// handlers/protected/mod.rs - Protected handlers (bearer identity token required)
//
// Every handler here takes an `AuthUser`, so a request without a valid token
// is rejected with 401 before the handler runs. Boats are further restricted
// to their owner; another user's boat answers 403.

pub mod boats;
