//! Diesel table definitions for the registry store.
//!
//! Tables mirror the canonical catalog in `domain::schema`; the catalog's
//! dependency order matches the declaration order here.

diesel::table! {
    specialists (id) {
        id -> Int8,
        name -> Text,
        specialty -> Text,
        city -> Text,
        email -> Text,
        phone -> Text,
        internal_number -> Nullable<Text>,
        bio -> Nullable<Text>,
        consultation_fee -> Nullable<Int8>,
        consultation_type -> Nullable<Text>,
        working_hours -> Nullable<Jsonb>,
        rating -> Float4,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    appointments (id) {
        id -> Int8,
        specialist_id -> Int8,
        patient_name -> Text,
        patient_email -> Text,
        patient_phone -> Nullable<Text>,
        appointment_date -> Date,
        appointment_time -> Text,
        appointment_type -> Nullable<Text>,
        status -> Text,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    orders (id) {
        id -> Int8,
        customer_name -> Text,
        customer_email -> Text,
        customer_phone -> Nullable<Text>,
        package_name -> Text,
        package_type -> Nullable<Text>,
        amount -> Int8,
        payment_method -> Text,
        status -> Text,
        parent_order_id -> Nullable<Int8>,
        invoice_number -> Nullable<Text>,
        invoice_issued_at -> Nullable<Timestamptz>,
        deleted_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    automatic_orders (id) {
        id -> Int8,
        customer_name -> Text,
        customer_email -> Text,
        customer_phone -> Nullable<Text>,
        package_name -> Text,
        monthly_amount -> Int8,
        monthly_payment_day -> Int4,
        paid_months -> Array<Int4>,
        current_month -> Int4,
        total_months -> Int4,
        first_order_id -> Nullable<Int8>,
        last_billed_on -> Nullable<Date>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    packages (id) {
        id -> Int8,
        package_key -> Text,
        name -> Text,
        price -> Int8,
        original_price -> Nullable<Int8>,
        features -> Array<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    blog_posts (id) {
        id -> Int8,
        slug -> Text,
        title -> Text,
        content -> Text,
        excerpt -> Nullable<Text>,
        author_name -> Text,
        author_specialist_id -> Nullable<Int8>,
        status -> Text,
        seo_title -> Nullable<Text>,
        seo_description -> Nullable<Text>,
        revision_count -> Int4,
        published_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    reviews (id) {
        id -> Int8,
        specialist_id -> Int8,
        patient_name -> Text,
        rating -> Int4,
        comment -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    assessment_tests (id) {
        id -> Int8,
        specialist_id -> Int8,
        title -> Text,
        description -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    test_questions (id) {
        id -> Int8,
        test_id -> Int8,
        position -> Int4,
        prompt -> Text,
        options -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    test_results (id) {
        id -> Int8,
        test_id -> Int8,
        participant_email -> Nullable<Text>,
        answers -> Jsonb,
        outcome -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    client_referrals (id) {
        id -> Int8,
        specialist_id -> Int8,
        year -> Int4,
        month -> Int4,
        referral_count -> Int4,
        is_referred -> Bool,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_profiles (id) {
        id -> Int8,
        user_id -> Uuid,
        role -> Text,
        is_approved -> Bool,
        display_name -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    support_tickets (id) {
        id -> Int8,
        subject -> Text,
        body -> Text,
        requester_email -> Text,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    sms_logs (id) {
        id -> Int8,
        recipient -> Text,
        body -> Text,
        status -> Text,
        provider_message_id -> Nullable<Text>,
        sent_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    social_shares (id) {
        id -> Int8,
        platform -> Text,
        content_url -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    website_analytics (id) {
        id -> Int8,
        day -> Date,
        page_views -> Int8,
        unique_visitors -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    success_statistics (id) {
        id -> Int8,
        label -> Text,
        value -> Int8,
        display_order -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    employee_salaries (id) {
        id -> Int8,
        employee_name -> Text,
        role -> Nullable<Text>,
        gross_amount -> Int8,
        period_year -> Int4,
        period_month -> Int4,
        paid_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    legal_proceedings (id) {
        id -> Int8,
        case_number -> Text,
        counterparty -> Nullable<Text>,
        status -> Text,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    database_backups (id) {
        id -> Int8,
        backup_type -> Text,
        created_by -> Nullable<Text>,
        notes -> Nullable<Text>,
        tables_count -> Int4,
        total_records -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    backup_records (id) {
        id -> Int8,
        backup_id -> Int8,
        table_name -> Text,
        row_count -> Int8,
        payload -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(appointments -> specialists (specialist_id));
diesel::joinable!(automatic_orders -> orders (first_order_id));
diesel::joinable!(blog_posts -> specialists (author_specialist_id));
diesel::joinable!(reviews -> specialists (specialist_id));
diesel::joinable!(assessment_tests -> specialists (specialist_id));
diesel::joinable!(test_questions -> assessment_tests (test_id));
diesel::joinable!(test_results -> assessment_tests (test_id));
diesel::joinable!(client_referrals -> specialists (specialist_id));
diesel::joinable!(backup_records -> database_backups (backup_id));

diesel::allow_tables_to_appear_in_same_query!(
    specialists,
    appointments,
    orders,
    automatic_orders,
    packages,
    blog_posts,
    reviews,
    assessment_tests,
    test_questions,
    test_results,
    client_referrals,
    user_profiles,
    support_tickets,
    sms_logs,
    social_shares,
    website_analytics,
    success_statistics,
    employee_salaries,
    legal_proceedings,
    database_backups,
    backup_records,
);
