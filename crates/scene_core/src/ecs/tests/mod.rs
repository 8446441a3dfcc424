//! Integration tests spanning components, systems and the scene manager

mod culling_integration;
