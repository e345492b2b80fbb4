//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Store a property's value, rejecting a second occurrence of the same property.
fn set_once<T: syn::parse::Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta<'_>,
    property: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{property}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

/// Build a compile error for a missing required property.
fn missing_property(property: &str) -> TokenStream {
    Error::new(
        proc_macro2::Span::call_site(),
        format!("missing required property: '{property}'"),
    )
    .to_compile_error()
    .into()
}

/// Procedural macro attribute that generates a `SolutionRunner` implementation.
///
/// The generated `run` routes to the `aoc_framework::runner` solve function matching the
/// properties given.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, the solution's display name.
/// - `part_one` (required): The type implementing `Solution<PartOne>`.
/// - `part_two` (optional): The type implementing `Solution<PartTwo>`. If omitted, only part one
///   is solved.
/// - `parsed` (optional): A type implementing `ParseData`, used to parse input before solving.
///   If omitted, the unparsed input string is passed directly to solvers.
/// - `part_one_label` / `part_two_label` (optional): Expressions evaluating to `&str`, captions
///   reported with each part's answer.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Required properties (`name`, `part_one`) are missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// ```ignore
/// #[solution_runner(name = "Day 1", part_one = Day01)]
/// struct Day01Runner;
/// ```
///
/// ```ignore
/// #[solution_runner(
///     name = "Day 12: Christmas Tree Farm",
///     parsed = Farm,
///     part_one = Day12,
///     part_one_label = "Regions that can fit all presents"
/// )]
/// impl AdventOfCode2025<12> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut name_expr_opt: Option<Expr> = None;
    let mut parsed_ty_opt: Option<Type> = None;
    let mut part_one_ty_opt: Option<Type> = None;
    let mut part_two_ty_opt: Option<Type> = None;
    let mut part_one_label_opt: Option<Expr> = None;
    let mut part_two_label_opt: Option<Expr> = None;

    let solution_runner_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            set_once(&mut name_expr_opt, &meta, "name")
        } else if meta.path.is_ident("parsed") {
            set_once(&mut parsed_ty_opt, &meta, "parsed")
        } else if meta.path.is_ident("part_one") {
            set_once(&mut part_one_ty_opt, &meta, "part_one")
        } else if meta.path.is_ident("part_two") {
            set_once(&mut part_two_ty_opt, &meta, "part_two")
        } else if meta.path.is_ident("part_one_label") {
            set_once(&mut part_one_label_opt, &meta, "part_one_label")
        } else if meta.path.is_ident("part_two_label") {
            set_once(&mut part_two_label_opt, &meta, "part_two_label")
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    });
    parse_macro_input!(args with solution_runner_parser);

    let Some(name_expr) = name_expr_opt else {
        return missing_property("name");
    };
    let Some(part_one_ty) = part_one_ty_opt else {
        return missing_property("part_one");
    };

    let part_one_label_call = part_one_label_opt.map(|label| {
        quote! { .with_part_one_label(#label) }
    });
    let part_two_label_call = part_two_label_opt.map(|label| {
        quote! { .with_part_two_label(#label) }
    });
    let info_init = quote! {
        let info = aoc_framework::runner::SolutionInfo::new(#name_expr)
            #part_one_label_call
            #part_two_label_call;
    };

    let solve_function_call = match (parsed_ty_opt, part_two_ty_opt) {
        (None, None) => quote! {
            aoc_framework::runner::solve_half_solution::<#part_one_ty>(&info, input, handler, timed)
        },
        (None, Some(part_two_ty)) => quote! {
            aoc_framework::runner::solve_full_solution::<#part_one_ty, #part_two_ty>(
                &info,
                input,
                handler,
                timed
            )
        },
        (Some(parsed_ty), None) => quote! {
            aoc_framework::runner::solve_parsed_half_solution::<#parsed_ty, #part_one_ty>(
                &info,
                input,
                handler,
                timed
            )
        },
        (Some(parsed_ty), Some(part_two_ty)) => quote! {
            aoc_framework::runner::solve_parsed_full_solution::<
                #parsed_ty,
                #part_one_ty,
                #part_two_ty
            >(&info, input, handler, timed)
        },
    };

    let original_input = input.clone(); // clone before macro consumes input
    let item = parse_macro_input!(input as Item);

    let runner_ty = match item {
        Item::Struct(ItemStruct { ident, .. }) => quote! { #ident },
        Item::Impl(ItemImpl { self_ty, .. }) => quote! { #self_ty },
        _ => {
            return Error::new(
                proc_macro2::Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    let input_ts = proc_macro2::TokenStream::from(original_input);
    TokenStream::from(quote! {
        #input_ts

        impl aoc_framework::runner::SolutionRunner for #runner_ty {
            fn run(
                input: &str,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                timed: bool
            ) -> aoc_framework::DynamicResult<()> {
                #info_init
                #solve_function_call
            }
        }
    })
}
