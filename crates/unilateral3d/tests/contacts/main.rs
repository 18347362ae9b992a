mod bounded_speed;
mod hard_stops;
mod laws;
mod plane_contacts;
mod system;
