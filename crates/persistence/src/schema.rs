// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    app_config (id) {
        id -> BigInt,
        document -> Text,
    }
}

diesel::table! {
    courts (id) {
        id -> BigInt,
        name -> Text,
        kind -> Text,
        active -> Integer,
        capacity -> Integer,
        description -> Nullable<Text>,
        price_normal -> Nullable<BigInt>,
        price_night -> Nullable<BigInt>,
        price_weekend -> Nullable<BigInt>,
        display_order -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    reservations (id) {
        id -> Text,
        court_id -> BigInt,
        date -> Text,
        start_minutes -> Integer,
        end_minutes -> Integer,
        customer_name -> Text,
        customer_phone -> Text,
        customer_email -> Nullable<Text>,
        customer_document_id -> Nullable<Text>,
        price -> BigInt,
        status -> Text,
        origin -> Text,
        notes -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::joinable!(reservations -> courts (court_id));

diesel::allow_tables_to_appear_in_same_query!(app_config, courts, reservations,);
