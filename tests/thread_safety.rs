//! Compile-time guarantees hosts rely on when moving followers between
//! threads or storing them in ECS components.

use static_assertions::assert_impl_all;
use trundle::{
    Cart, EffectRequest, Follower, FollowerRegistry, FollowerSnapshot, Path, Replica,
    SpawnRequest, StrideSettings,
};

assert_impl_all!(Path: Send, Sync, Clone);
assert_impl_all!(Follower<u64>: Send, Sync, Clone);
assert_impl_all!(FollowerRegistry<u64>: Send, Sync);
assert_impl_all!(SpawnRequest<String>: Send, Sync, Clone);
assert_impl_all!(FollowerSnapshot<String>: Send, Sync, serde::Serialize);
assert_impl_all!(Replica<String>: Send, Sync);
assert_impl_all!(EffectRequest: Send, Sync, Copy, serde::Serialize);
assert_impl_all!(StrideSettings: Send, Sync, serde::Serialize);
assert_impl_all!(Cart: Send, Sync, bevy::prelude::Component);
