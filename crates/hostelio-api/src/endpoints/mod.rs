// Endpoint groups, each implemented as inherent methods on `ApiClient`.

mod accounts;
mod admin;
mod apartments;
mod bookings;
mod chat;
mod owner;
mod payments;
mod wishlist;
