use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Transform an asynchronous route test into a synchronous one, building a
/// local rocket instance and injecting a tracked client.
///
/// The wrapped function may take a single
/// [`rocket::local::asynchronous::Client`] parameter, or none at all.
/// Passing `coordinator` as the attribute argument logs the client in with
/// the example coordinator credentials before the test body runs.
#[proc_macro_attribute]
pub fn backend_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract type information and reject invalid function signatures.
    let test_args = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    // Authenticate the client as the coordinator if requested.
    let maybe_login = match parse_macro_input!(args as Option<Ident>) {
        Some(arg) if arg == "coordinator" => quote! {
            let response = rocket_client
                .post("/auth/coordinator")
                .header(rocket::http::ContentType::JSON)
                .body(
                    rocket::serde::json::json!(
                        crate::model::auth::OperatorCredentials::example()
                    )
                    .to_string(),
                )
                .dispatch()
                .await;
            assert_eq!(response.status(), rocket::http::Status::Ok);
        },
        Some(arg) => {
            return syn::Error::new(arg.span(), "Expected `coordinator` or nothing")
                .into_compile_error()
                .into();
        }
        None => TokenStream2::new(),
    };

    // Rewrite the test function.
    quote! {
        #[test]
        fn #name() {
            /// Test setup: a tracked client against a fresh rocket.
            async fn setup() -> rocket::local::asynchronous::Client {
                let rocket_client =
                    rocket::local::asynchronous::Client::tracked(crate::build())
                        .await
                        .unwrap();

                { #maybe_login }

                rocket_client
            }

            /// The test itself.
            #item_fn

            let runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("rocket-worker-test-thread")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                let rocket_client = setup().await;
                #new_name(#(#test_args),*).await;
            });
        }
    }
    .into()
}

/// Ensure the wrapped test is async and takes at most a single `Client`.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let (Pat::Ident(_), Type::Path(type_path)) = (&*pat_type.pat, &*pat_type.ty) {
                if let Some(type_ident) = type_path.path.get_ident() {
                    if type_ident == "Client" && args.is_empty() {
                        args.push(quote! { rocket_client });
                        continue;
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected at most one `client_ident: Client` parameter",
        ));
    }

    Ok(args)
}
