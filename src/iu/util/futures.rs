// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Future-related utility code lives here.

use futures::*;

// This converts a concrete object implementing the `Future` trait into a
// `Box`ed trait object. This allows for a function to return a variety of
// Future-traited objects with different concrete types, while allowing them
// all to be typed the same.
pub fn into_future_trait<F, I, E>(f: F) -> Box<dyn Future<Item = I, Error = E> + Send>
where
    F: 'static + Send + Future<Item = I, Error = E>,
{
    Box::new(f)
}
