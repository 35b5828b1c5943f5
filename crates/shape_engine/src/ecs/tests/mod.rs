//! ECS integration tests
