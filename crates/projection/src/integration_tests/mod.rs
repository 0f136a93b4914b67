//! Integration tests driving a headless Bevy App with `ProjectionPlugin`.
