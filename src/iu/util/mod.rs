// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Utility code lives here.

pub mod futures;
